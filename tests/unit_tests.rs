// Unit tests for Agenda Algo

use agenda_algo::core::{
    compile, distance, haversine_distance, normalize, MatchError, ProximityMatcher,
};
use agenda_algo::models::{Event, FilterSpec, Station};

fn create_event(neighborhood: &str, begin: &str, end: &str) -> Event {
    Event {
        name: "Cicle de Jazz".to_string(),
        address: "Carrer de Verdi, 32".to_string(),
        neighborhood: neighborhood.to_string(),
        begin_date: begin.to_string(),
        end_date: end.to_string(),
        time_of_day: "21:00".to_string(),
        latitude: "41.38".to_string(),
        longitude: "2.17".to_string(),
    }
}

fn create_station(id: &str, lat: f64, lon: f64, bikes: u32) -> Station {
    Station {
        id: id.to_string(),
        street: format!("Station {}", id),
        latitude: lat.to_string(),
        longitude: lon.to_string(),
        available_bikes: bikes,
        available_slots: 10,
    }
}

fn bikes_available(station: &Station) -> bool {
    station.available_bikes > 0
}

#[test]
fn test_normalize_is_idempotent() {
    for text in ["Gràcia", "Sant Martí de Provençals", "ÀÉÍÓÚ àèìòù", "C/ Major, 5-7", "żółw"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", text);
    }
}

#[test]
fn test_normalize_example() {
    assert_eq!(normalize("Carrer-123, Àlaba!"), "carrer123 alaba");
}

#[test]
fn test_distance_symmetry_and_identity() {
    let points = [("2.17", "41.38"), ("2.171", "41.381"), ("-0.1278", "51.5074"), ("151.2", "-33.86")];

    for (lon1, lat1) in points {
        assert_eq!(distance(lon1, lat1, lon1, lat1).unwrap(), 0.0);
        for (lon2, lat2) in points {
            let pq = distance(lon1, lat1, lon2, lat2).unwrap();
            let qp = distance(lon2, lat2, lon1, lat1).unwrap();
            assert!((pq - qp).abs() < 1e-6);
            assert!(pq >= 0.0);
        }
    }
}

#[test]
fn test_haversine_distance_barcelona_to_madrid() {
    // About 505 km as the crow flies
    let d = haversine_distance(41.3874, 2.1686, 40.4168, -3.7038);
    assert!(d > 495_000.0 && d < 510_000.0, "got {}", d);
}

#[test]
fn test_scenario_nearby_station_with_bikes() {
    let matcher = ProximityMatcher::default();
    let event = create_event("el Raval", "10/06/2024", "12/06/2024");
    let stations = vec![create_station("42", 41.381, 2.171, 3)];

    let ranked = matcher.rank(&event, &stations, Some(bikes_available)).unwrap();

    assert_eq!(ranked.len(), 1);
    assert!(ranked[0].distance_meters > 0.0 && ranked[0].distance_meters <= 500.0);
}

#[test]
fn test_scenario_accent_and_case_folding() {
    let filter = compile(&FilterSpec::Text("Gràcia".to_string())).unwrap();
    let event = create_event("GRACIA", "10/06/2024", "12/06/2024");

    assert!(filter.matches(&event).unwrap());
}

#[test]
fn test_scenario_window_before_event_end() {
    let filter = compile(&FilterSpec::DateWindow {
        date: "15/06/2024".to_string(),
        before_days: 2,
        after_days: 2,
    })
    .unwrap();
    let event = create_event("GRACIA", "10/06/2024", "12/06/2024");

    assert!(!filter.matches(&event).unwrap());
}

#[test]
fn test_scenario_cap_not_radius() {
    let matcher = ProximityMatcher::default();
    let event = create_event("el Raval", "10/06/2024", "12/06/2024");
    let stations: Vec<Station> = (1..=6)
        .map(|i| create_station(&i.to_string(), 41.38 + 0.0004 * i as f64, 2.17, 1))
        .collect();

    let ranked = matcher.rank(&event, &stations, Some(bikes_available)).unwrap();

    assert_eq!(ranked.len(), 5);
    assert!(ranked.iter().all(|n| n.point.id != "6"));
    assert!(ranked.windows(2).all(|w| w[0].distance_meters <= w[1].distance_meters));
}

#[test]
fn test_scenario_empty_station_excluded_even_if_nearest() {
    let matcher = ProximityMatcher::default();
    let event = create_event("el Raval", "10/06/2024", "12/06/2024");
    let stations = vec![
        create_station("empty", 41.38, 2.17, 0),
        create_station("farther", 41.382, 2.17, 2),
    ];

    let ranked = matcher.rank(&event, &stations, Some(bikes_available)).unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].point.id, "farther");
}

#[test]
fn test_rank_invariants_with_small_cap_and_radius() {
    let matcher = ProximityMatcher::new(150.0, 3);
    let event = create_event("el Raval", "10/06/2024", "12/06/2024");
    let stations: Vec<Station> = (0..20)
        .map(|i| create_station(&i.to_string(), 41.38 + 0.0002 * (i % 7) as f64, 2.17 + 0.0001 * i as f64, 1))
        .collect();

    let ranked = matcher.rank(&event, &stations, None::<fn(&Station) -> bool>).unwrap();

    assert!(ranked.len() <= 3);
    assert!(ranked.iter().all(|n| n.distance_meters <= 150.0));
    assert!(ranked.windows(2).all(|w| w[0].distance_meters <= w[1].distance_meters));
}

#[test]
fn test_conjunction_matches_both_parts() {
    let a = FilterSpec::Text("jazz".to_string());
    let b = FilterSpec::DateExact("11/06/2024".to_string());
    let event = create_event("el Raval", "10/06/2024", "12/06/2024");

    let both = compile(&FilterSpec::All(vec![a.clone(), b.clone()])).unwrap();
    let left = compile(&a).unwrap().matches(&event).unwrap();
    let right = compile(&b).unwrap().matches(&event).unwrap();

    assert_eq!(both.matches(&event).unwrap(), left && right);
}

#[test]
fn test_invalid_date_is_reported() {
    let result = compile(&FilterSpec::DateWindow {
        date: "31/02/2024".to_string(),
        before_days: 1,
        after_days: 1,
    });

    assert_eq!(
        result.unwrap_err(),
        MatchError::InvalidDate { value: "31/02/2024".to_string() }
    );
}
