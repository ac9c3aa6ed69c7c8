pub mod episodes;
pub mod health;
pub mod podcasts;
pub mod reviews;
pub mod users;

use crate::error::AppError;

pub(crate) fn invalid(message: &'static str) -> AppError {
    AppError::bad_request("VALIDATION_ERROR", message)
}
