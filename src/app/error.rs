use actix_web::{
  error::ResponseError,
  HttpResponse
};
use derive_more::Display;
use log::error;

// Full error detail goes to the logs, the response
// bodies stay generic so datastore internals don't
// show up for random visitors. The admin mutations
// don't go through here, they report failures inside
// their JSON result instead.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "Internal Server Error")]
  InternalServerError(String),
  #[display(fmt = "Database Error")]
  DatabaseError(String),
  #[display(fmt = "Not Found: {}", _0)]
  NotFound(String),
  #[display(fmt = "Too Many Requests")]
  TooManyRequests
}

impl ResponseError for Error {
  fn error_response(&self) -> HttpResponse {
    match self {
      Error::InternalServerError(_) | Error::DatabaseError(_) =>
        HttpResponse::InternalServerError().body(self.to_string()),
      Error::NotFound(_) => HttpResponse::NotFound().body(self.to_string()),
      Error::TooManyRequests =>
        HttpResponse::TooManyRequests().body(self.to_string())
    }
  }
}

// Standard conversion for datastore reads that should
// turn into a 500. Generic because the blocking call
// wrapper has its own error type around the report.
pub fn map_db_error<E: std::fmt::Display>(e: E) -> Error {
  error!("Database error - {}", e);
  Error::DatabaseError(e.to_string())
}
