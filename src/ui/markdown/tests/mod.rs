mod helpers;
mod wrapping;
