//! Entity <-> model mappers

mod achievement;
mod chat_message;
mod goal;
mod session;
mod showcase;
mod user;
mod viewer;
