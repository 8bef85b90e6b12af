use rubrika_core::api_models::{Category, Message};
use rubrika_database::entities;

use crate::api::traits::IntoApiModel;



impl IntoApiModel<Message> for entities::CategoryMessageModel {
    fn into_api_model(self) -> Message {
        Message {
            id: self.id,
            text: self.text,
            created_at: self.created_at,
        }
    }
}

impl IntoApiModel<Category> for entities::CategoryModel {
    fn into_api_model(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            messages: self
                .messages
                .into_iter()
                .map(IntoApiModel::into_api_model)
                .collect(),
            created_at: self.created_at,
            updated_at: self.last_modified_at,
        }
    }
}
