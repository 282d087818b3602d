use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::models::Hotel;

const CENTRAL_DISTRICTS: &[&str] = &["Quận 1", "Quận 3", "Bình Thạnh"];
const OUTER_DISTRICTS: &[&str] = &["Tân Phú", "Bình Tân", "Gò Vấp"];
const AMENITIES: &[&str] = &["wifi", "elevator", "parking", "breakfast", "pool", "gym"];

/// Share of generated hotels placed in central districts
const CENTRAL_SHARE: f64 = 0.45;

/// Generate a deterministic catalog of `n` hotels
///
/// Central districts are pricier (800k-2M VND) than outer ones
/// (300k-800k VND). The same `(n, seed)` always yields the same catalog.
pub fn generate_mock_hotels(n: usize, seed: u64) -> Vec<Hotel> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=n as u32)
        .map(|id| {
            let (district, price) = if rng.gen::<f64>() < CENTRAL_SHARE {
                let d = CENTRAL_DISTRICTS[rng.gen_range(0..CENTRAL_DISTRICTS.len())];
                (d, rng.gen_range(800_000..=2_000_000))
            } else {
                let d = OUTER_DISTRICTS[rng.gen_range(0..OUTER_DISTRICTS.len())];
                (d, rng.gen_range(300_000..=800_000))
            };

            let rating = (rng.gen_range(5.0..=9.5_f64) * 10.0).round() / 10.0;

            let amenity_count = rng.gen_range(1..=3);
            let amenities = AMENITIES
                .choose_multiple(&mut rng, amenity_count)
                .map(|a| a.to_string())
                .collect();

            let mut hotel = Hotel::new(id, format!("Hotel {}", id), district, price as f64, rating);
            hotel.amenities = amenities;
            hotel
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deterministic_for_seed() {
        let a = generate_mock_hotels(50, 42);
        let b = generate_mock_hotels(50, 42);
        assert_eq!(a, b);

        let c = generate_mock_hotels(50, 7);
        assert_ne!(a, c);
    }

    #[test]
    fn test_generated_fields_in_range() {
        let hotels = generate_mock_hotels(200, 1);
        assert_eq!(hotels.len(), 200);

        for (i, hotel) in hotels.iter().enumerate() {
            assert_eq!(hotel.id, i as u32 + 1);
            assert_eq!(hotel.name, format!("Hotel {}", hotel.id));
            assert!(hotel.rating >= 5.0 && hotel.rating <= 9.5);
            assert!((1..=3).contains(&hotel.amenities.len()));

            let unique: HashSet<_> = hotel.amenities.iter().collect();
            assert_eq!(unique.len(), hotel.amenities.len());

            if CENTRAL_DISTRICTS.contains(&hotel.district.as_str()) {
                assert!(hotel.price >= 800_000.0 && hotel.price <= 2_000_000.0);
            } else {
                assert!(OUTER_DISTRICTS.contains(&hotel.district.as_str()));
                assert!(hotel.price >= 300_000.0 && hotel.price <= 800_000.0);
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        assert!(generate_mock_hotels(0, 42).is_empty());
    }
}
