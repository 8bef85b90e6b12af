use chrono::{DateTime, Utc};
use rubrika_core::ids::{CategoryId, MessageId};
use uuid::Uuid;

use crate::IntoExternalModel;



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryMessageModel {
    pub id: MessageId,

    pub text: String,

    pub created_at: DateTime<Utc>,
}


/// A category along with all of its messages, in append order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CategoryModel {
    pub id: CategoryId,

    pub name: String,

    pub messages: Vec<CategoryMessageModel>,

    pub created_at: DateTime<Utc>,

    pub last_modified_at: DateTime<Utc>,
}



#[derive(sqlx::FromRow)]
pub struct InternalCategoryModel {
    pub(crate) id: Uuid,

    pub(crate) name: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) last_modified_at: DateTime<Utc>,
}

impl InternalCategoryModel {
    /// Attaches the (already ordered) messages to the category row.
    pub(crate) fn into_external_model_with_messages(
        self,
        messages: Vec<CategoryMessageModel>,
    ) -> CategoryModel {
        CategoryModel {
            id: CategoryId::new(self.id),
            name: self.name,
            messages,
            created_at: self.created_at,
            last_modified_at: self.last_modified_at,
        }
    }
}


#[derive(sqlx::FromRow)]
pub struct InternalCategoryMessageModel {
    pub(crate) id: Uuid,

    pub(crate) category_id: Uuid,

    pub(crate) text: String,

    pub(crate) created_at: DateTime<Utc>,
}

impl IntoExternalModel for InternalCategoryMessageModel {
    type ExternalModel = CategoryMessageModel;

    fn into_external_model(self) -> Self::ExternalModel {
        CategoryMessageModel {
            id: MessageId::new(self.id),
            text: self.text,
            created_at: self.created_at,
        }
    }
}



#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewCategoryMessage {
    pub text: String,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NewCategory {
    pub name: String,

    /// Initial messages, stored in the given order.
    pub messages: Vec<NewCategoryMessage>,
}
