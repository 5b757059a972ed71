//! Built-in product data.

use cornershop_core::{CurrencyCode, Price, Product, ProductId};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

struct Seed {
    id: i32,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: &'static str,
    featured: bool,
    rating: f32,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        name: "Wireless Bluetooth Headphones",
        description: "Experience crystal-clear sound with these premium wireless headphones featuring active noise cancellation and 30-hour battery life.",
        cents: 12999,
        category: "electronics",
        featured: true,
        rating: 4.8,
    },
    Seed {
        id: 2,
        name: "Smart Fitness Watch",
        description: "Track your fitness goals with this advanced smartwatch featuring heart rate monitoring, sleep tracking, and waterproof design.",
        cents: 8999,
        category: "electronics",
        featured: true,
        rating: 4.6,
    },
    Seed {
        id: 3,
        name: "Ergonomic Office Chair",
        description: "Improve your work-from-home setup with this comfortable ergonomic chair featuring lumbar support and adjustable height.",
        cents: 19999,
        category: "furniture",
        featured: false,
        rating: 4.5,
    },
    Seed {
        id: 4,
        name: "Stainless Steel Water Bottle",
        description: "Stay hydrated with this eco-friendly, vacuum-insulated water bottle that keeps drinks cold for 24 hours or hot for 12 hours.",
        cents: 2499,
        category: "accessories",
        featured: false,
        rating: 4.7,
    },
    Seed {
        id: 5,
        name: "Wireless Charging Pad",
        description: "Charge your compatible devices wirelessly with this sleek, fast-charging pad featuring intelligent temperature control.",
        cents: 3499,
        category: "electronics",
        featured: true,
        rating: 4.4,
    },
    Seed {
        id: 6,
        name: "Bamboo Cutting Board Set",
        description: "Upgrade your kitchen with this sustainable bamboo cutting board set featuring three different sizes for all your food prep needs.",
        cents: 4299,
        category: "kitchen",
        featured: false,
        rating: 4.8,
    },
    Seed {
        id: 7,
        name: "Ultra HD 4K Webcam",
        description: "Look your best during video calls with this crystal-clear 4K webcam featuring auto-focus and low-light correction technology.",
        cents: 7999,
        category: "electronics",
        featured: false,
        rating: 4.6,
    },
    Seed {
        id: 8,
        name: "Premium Yoga Mat",
        description: "Enhance your yoga practice with this eco-friendly, non-slip yoga mat featuring optimal cushioning and easy-to-clean surface.",
        cents: 4999,
        category: "fitness",
        featured: true,
        rating: 4.9,
    },
];

pub(super) fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: Price::from_cents(seed.cents, CurrencyCode::USD),
            image: PLACEHOLDER_IMAGE.to_string(),
            category: seed.category.to_string(),
            featured: seed.featured,
            in_stock: true,
            rating: seed.rating,
        })
        .collect()
}
