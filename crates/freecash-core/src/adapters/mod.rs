mod fixture;
mod yahoo;

pub use fixture::{FixtureCompany, FixtureProvider};
pub use yahoo::YahooAdapter;
