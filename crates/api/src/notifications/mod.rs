//! Push notification delivery.
//!
//! [`fcm::FcmClient`] sends push messages to device tokens via the Firebase
//! Cloud Messaging HTTP API. Delivery is best-effort and runs off the request
//! path; the persisted notification row is the source of truth.

pub mod fcm;
