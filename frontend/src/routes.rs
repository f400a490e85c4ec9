use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::listing_location::ListingLocation;
use crate::pages::home_page::HomePage;
use crate::pages::listing_page::ListingPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/venues?:..location")]
    ListingPage {
        location: ListingLocation,
    },

}

impl Route {
    pub fn listing_page_from_location(location: &str) -> Self {
        Self::ListingPage {
            location: ListingLocation::from(location),
        }
    }
}
