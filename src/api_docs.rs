use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        api::books::get_book,
        api::books::update_book,
        api::books::delete_book,
    ),
    tags(
        (name = "bookstore", description = "Bookstore API")
    )
)]
pub struct ApiDoc;
