pub mod support;

mod check;
mod normalize;
mod resolve;
