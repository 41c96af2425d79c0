use serde::Serialize;

pub mod feedback;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}
