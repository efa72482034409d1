//! src/test_utils.rs
use std::path::PathBuf;

pub const HEADER_COLUMNS: [&str; 15] = [
    "id",
    "storeId",
    "storeName",
    "title",
    "rating",
    "reviews",
    "imageUrl",
    "productUrl",
    "sold",
    "price",
    "originalPrice",
    "discount",
    "currency",
    "categoryId",
    "category_name",
];

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub fn header_line() -> String {
    HEADER_COLUMNS.join(",")
}

/// One listing row with sensible defaults for the columns a test does not
/// care about.
#[derive(Debug, Clone)]
pub struct Listing {
    store_name: String,
    category_name: String,
    rating: String,
    sold: String,
    price: String,
}

impl Listing {
    pub fn new(store_name: &str, category_name: &str) -> Self {
        Listing {
            store_name: store_name.to_string(),
            category_name: category_name.to_string(),
            rating: "4.0".to_string(),
            sold: "1 sold".to_string(),
            price: "1.0".to_string(),
        }
    }

    pub fn rating(mut self, rating: &str) -> Self {
        self.rating = rating.to_string();
        self
    }

    pub fn sold(mut self, sold: &str) -> Self {
        self.sold = sold.to_string();
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        self.price = price.to_string();
        self
    }
}

pub fn listing_line(listing: &Listing) -> String {
    [
        "1005001",
        "912",
        listing.store_name.as_str(),
        "Item",
        listing.rating.as_str(),
        "12",
        "https://img.example/1.jpg",
        "https://shop.example/1",
        listing.sold.as_str(),
        listing.price.as_str(),
        "9.99",
        "10%",
        "USD",
        "7",
        listing.category_name.as_str(),
    ]
    .join(",")
}

pub fn listing_lines(listings: &[Listing]) -> Vec<String> {
    listings.iter().map(listing_line).collect()
}
