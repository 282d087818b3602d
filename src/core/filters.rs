use chrono::NaiveDate;
use crate::models::{Hotel, HotelFilter, Purpose, UserInput};

/// Minimum rating a hotel needs to be considered for a purpose
#[inline]
pub fn rating_floor(purpose: &Purpose) -> f64 {
    match purpose {
        Purpose::Leisure | Purpose::Family | Purpose::Business => 7.0,
        Purpose::Premium => 7.5,
        Purpose::Budget | Purpose::LongTerm | Purpose::Other(_) => 6.0,
    }
}

/// Check whether the hotel's availability window covers the whole stay
#[inline]
pub fn is_available(hotel: &Hotel, check_in: NaiveDate, check_out: NaiveDate) -> bool {
    hotel.available_from <= check_in && hotel.available_to >= check_out
}

/// Check if a hotel passes the hard constraints of a stay
///
/// Stage 1 of the recommendation pipeline: district, availability and
/// the purpose's rating floor. Budget is never a hard constraint.
#[inline]
pub fn passes_hard_filter(hotel: &Hotel, input: &UserInput) -> bool {
    if hotel.district != input.district {
        return false;
    }

    if !is_available(hotel, input.check_in, input.check_out) {
        return false;
    }

    hotel.rating >= rating_floor(&input.purpose)
}

/// Hotels passing the hard filter, in catalog order
pub fn hard_filter<'a>(hotels: &'a [Hotel], input: &UserInput) -> Vec<&'a Hotel> {
    hotels
        .iter()
        .filter(|hotel| passes_hard_filter(hotel, input))
        .collect()
}

/// Check a hotel against the listing/search filters
#[inline]
pub fn matches_search(hotel: &Hotel, filter: &HotelFilter) -> bool {
    if let Some(district) = &filter.district {
        if &hotel.district != district {
            return false;
        }
    }

    if filter.min_price.is_some_and(|min| hotel.price < min) {
        return false;
    }

    if filter.max_price.is_some_and(|max| hotel.price > max) {
        return false;
    }

    if filter.min_rating.is_some_and(|min| hotel.rating < min) {
        return false;
    }

    match &filter.amenity {
        Some(amenity) => hotel.has_amenity(amenity),
        None => true,
    }
}
