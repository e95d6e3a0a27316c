use crate::models::request::SearchRequest;
use crate::models::responses::SearchResponse;
use crate::services::search::search;
use axum::{http::StatusCode, response::Json};
use tracing::{error, info};

pub async fn search_books(
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, StatusCode> {
    info!("Search query: {}", request.search_term);

    match search(request.search_term, &request.books) {
        Ok(response) => {
            info!("Search returned {} results", response.results.len());
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to search books: {}", e);
            Err(StatusCode::UNPROCESSABLE_ENTITY)
        }
    }
}
