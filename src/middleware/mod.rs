//! Request middleware.
//!
//! [`auth`] provides the `AuthUser` extractor that protected handlers take
//! as an argument: the request must carry `Authorization: Bearer <token>`
//! with a token this API issued.

pub mod auth;
