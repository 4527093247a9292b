// GET / handler

use crate::models::StatusResponse;
use std::convert::Infallible;

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&StatusResponse::running()))
}
