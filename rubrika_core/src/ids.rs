macro_rules! create_uuid_newtype {
    ($struct_name:ident) => {
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(transparent)]
        pub struct $struct_name(pub(crate) uuid::Uuid);

        impl $struct_name {
            #[inline]
            pub fn new(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generates a new time-ordered (version 7) ID.
            #[inline]
            pub fn generate() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            #[inline]
            pub fn into_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl std::str::FromStr for $struct_name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let inner_uuid = <uuid::Uuid as std::str::FromStr>::from_str(s)?;

                Ok(Self(inner_uuid))
            }
        }

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}



create_uuid_newtype!(CategoryId);

create_uuid_newtype!(MessageId);



#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn generated_ids_are_time_ordered() {
        let first = CategoryId::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = CategoryId::generate();

        assert!(first < second);
        assert_eq!(first.into_uuid().get_version_num(), 7);
    }

    #[test]
    fn parses_and_displays_hyphenated_form() {
        let id = MessageId::from_str("0190c3c1-8e5c-7a1b-9f00-0123456789ab").unwrap();

        assert_eq!(id.to_string(), "0190c3c1-8e5c-7a1b-9f00-0123456789ab");
        assert_eq!(
            serde_json::to_string(&id).unwrap(),
            "\"0190c3c1-8e5c-7a1b-9f00-0123456789ab\""
        );
    }
}
