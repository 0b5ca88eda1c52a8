// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use stockgrid_app::{Product, RecordSource};

pub const QUANTITY_DIGITS: usize = 3;
pub const SKU_DIGITS: usize = 10;

const ADJECTIVES: [&str; 20] = [
    "Small",
    "Ergonomic",
    "Rustic",
    "Intelligent",
    "Gorgeous",
    "Incredible",
    "Fantastic",
    "Practical",
    "Sleek",
    "Awesome",
    "Generic",
    "Handcrafted",
    "Handmade",
    "Licensed",
    "Refined",
    "Unbranded",
    "Tasty",
    "Recycled",
    "Modern",
    "Oriental",
];

const MATERIALS: [&str; 12] = [
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen", "Bronze",
];

const PRODUCTS: [&str; 24] = [
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
    "Pizza", "Salad", "Sausages", "Chips",
];

/// SplitMix64 stream; any seed, zero included, gives a full-period sequence.
#[derive(Debug, Clone)]
struct SplitMix {
    state: u64,
}

impl SplitMix {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(Self::GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform-enough value in `0..bound`; `0` for an empty range.
    fn below(&mut self, bound: usize) -> usize {
        match bound {
            0 | 1 => 0,
            _ => (self.next_u64() % bound as u64) as usize,
        }
    }
}

/// Seeded generator of demo products. Two fakers built from the same seed
/// produce the same sequence.
#[derive(Debug, Clone)]
pub struct ProductFaker {
    rng: SplitMix,
}

impl ProductFaker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SplitMix::new(seed),
        }
    }

    pub fn product(&mut self) -> Product {
        let name = self.product_name();
        let quantity = self.numeric(QUANTITY_DIGITS);
        let sku = self.numeric(SKU_DIGITS);
        Product {
            name,
            quantity,
            sku,
        }
    }

    pub fn products(&mut self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.product()).collect()
    }

    /// "Adjective Material Product", e.g. "Rustic Granite Keyboard".
    pub fn product_name(&mut self) -> String {
        format!(
            "{} {} {}",
            self.pick(&ADJECTIVES),
            self.pick(&MATERIALS),
            self.pick(&PRODUCTS),
        )
    }

    /// A string of `len` decimal digits whose first digit is never zero.
    pub fn numeric(&mut self, len: usize) -> String {
        let mut digits = String::with_capacity(len);
        for position in 0..len {
            let digit = if position == 0 {
                1 + self.rng.below(9)
            } else {
                self.rng.below(10)
            };
            digits.push(char::from(b'0' + digit as u8));
        }
        digits
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.below(items.len())]
    }
}

impl RecordSource for ProductFaker {
    fn next_product(&mut self) -> Product {
        self.product()
    }
}

/// The two-row table used throughout the scenario tests.
pub fn fixture_products() -> Vec<Product> {
    vec![
        Product::new("Chair", "0000000001", "010"),
        Product::new("Desk", "0000000002", "005"),
    ]
}
