mod endpoints;
use actix_web::web;
pub use endpoints::*;
mod model_impls;


/// Registers the category endpoints directly on the given scope,
/// since their paths do not share a common prefix.
#[rustfmt::skip]
pub fn configure_category_routes(configuration: &mut web::ServiceConfig) {
    configuration
        .service(create_category)
        .service(append_message_to_category)
        .service(get_all_categories)
        .service(get_specific_category);
}
