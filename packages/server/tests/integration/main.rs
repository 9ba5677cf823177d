mod common;

mod auth;
mod media;
mod moderation;
mod records;
mod startup;
mod submissions;
