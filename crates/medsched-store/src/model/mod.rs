//! `Record` implementations for the domain entities.

mod hospital;
mod meeting;
