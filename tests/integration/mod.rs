//! Integration tests for the targ command framework

mod dispatch;
mod test_utils;
