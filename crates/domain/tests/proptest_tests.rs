//! Property-based tests for pagination and proximity ranking

use domain::{
    GeoLocation, Station, StationFields, StationId, Window, nearest, rank_by_distance,
};
use proptest::prelude::*;

fn stations_strategy() -> impl Strategy<Value = Vec<Station>> {
    prop::collection::vec((-80.0f64..80.0f64, -170.0f64..170.0f64), 0..40).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| {
                Station::new(
                    StationId::from_raw(i as i64 + 1),
                    StationFields::new(format!("S{i}"), lat, lng, "P"),
                )
            })
            .collect()
    })
}

// ============================================================================
// Window Property Tests
// ============================================================================

mod window_tests {
    use super::*;

    proptest! {
        #[test]
        fn limits_in_range_accepted(offset in any::<u64>(), limit in 1u32..=20u32) {
            let window = Window::new(offset, limit);
            prop_assert!(window.is_ok());
        }

        #[test]
        fn limits_out_of_range_rejected(
            offset in any::<u64>(),
            limit in prop_oneof![Just(0u32), 21u32..=u32::MAX]
        ) {
            prop_assert!(Window::new(offset, limit).is_err());
        }

        #[test]
        fn apply_matches_skip_take(len in 0usize..60, offset in 0u64..80, limit in 1u32..=20u32) {
            let window = Window::new(offset, limit).unwrap();
            let items: Vec<usize> = (0..len).collect();
            let page = window.apply(items.clone());

            let expected_len = len.saturating_sub(usize::try_from(offset).unwrap()).min(limit as usize);
            prop_assert_eq!(page.len(), expected_len);
            if let Some(first) = page.first() {
                prop_assert_eq!(*first, usize::try_from(offset).unwrap());
            }
        }
    }
}

// ============================================================================
// Proximity Ranking Property Tests
// ============================================================================

mod ranking_tests {
    use super::*;

    proptest! {
        #[test]
        fn ranking_is_sorted_by_distance_then_id(
            stations in stations_strategy(),
            lat in -90.0f64..=90.0f64,
            lng in -180.0f64..=180.0f64
        ) {
            let origin = GeoLocation::new(lat, lng).unwrap();
            let ranked = rank_by_distance(&origin, stations);

            for pair in ranked.windows(2) {
                let ordered = pair[0].distance_km < pair[1].distance_km
                    || (pair[0].distance_km == pair[1].distance_km
                        && pair[0].station.id < pair[1].station.id);
                prop_assert!(ordered);
            }
        }

        #[test]
        fn ranking_keeps_every_station(
            stations in stations_strategy(),
            lat in -90.0f64..=90.0f64,
            lng in -180.0f64..=180.0f64
        ) {
            let origin = GeoLocation::new(lat, lng).unwrap();
            let mut expected: Vec<i64> = stations.iter().map(|s| s.id.as_i64()).collect();
            let mut actual: Vec<i64> = rank_by_distance(&origin, stations)
                .into_iter()
                .map(|r| r.station.id.as_i64())
                .collect();
            expected.sort_unstable();
            actual.sort_unstable();
            prop_assert_eq!(expected, actual);
        }

        #[test]
        fn nearest_is_a_window_of_the_ranking(
            stations in stations_strategy(),
            offset in 0u64..50,
            limit in 1u32..=20u32
        ) {
            let origin = GeoLocation::new(47.0, 22.0).unwrap();
            let window = Window::new(offset, limit).unwrap();
            let full: Vec<Station> = rank_by_distance(&origin, stations.clone())
                .into_iter()
                .map(|r| r.station)
                .collect();
            let page = nearest(&origin, &window, stations);
            prop_assert_eq!(page, window.apply(full));
        }

        #[test]
        fn distance_is_symmetric(
            lat1 in -90.0f64..=90.0f64,
            lng1 in -180.0f64..=180.0f64,
            lat2 in -90.0f64..=90.0f64,
            lng2 in -180.0f64..=180.0f64
        ) {
            let a = GeoLocation::new(lat1, lng1).unwrap();
            let b = GeoLocation::new(lat2, lng2).unwrap();
            prop_assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-6);
            prop_assert!(a.distance_km(&b) >= 0.0);
        }
    }
}
