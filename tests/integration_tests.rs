// Integration tests for Agenda Algo

use agenda_algo::cli::{date_filter, key_filter, parse_literal};
use agenda_algo::services::{parse_events, parse_parkings, parse_stations, FeedClient};
use agenda_algo::{
    standard_configs, FilterSpec, MatchPipeline, MatchReport, ProximityMatcher, FIELD_BICING_BIKES,
    FIELD_BICING_SLOTS, FIELD_PARKINGS,
};
use std::time::Duration;

const AGENDA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response><body><resultat><actes>
  <row num="1"><item>
    <name>Concert a la plaça</name>
    <addresses><item><address>Plaça de la Virreina</address><barri>la Vila de Gràcia</barri></item></addresses>
    <begindate>10/06/2024</begindate><enddate>12/06/2024</enddate><proxhour>20.00</proxhour>
    <gmapx>41.38</gmapx><gmapy>2.17</gmapy>
  </item></row>
  <row num="2"><item>
    <name>Exposició de fotografia</name>
    <addresses><item><address>Carrer de Sants, 79</address><barri>Sants</barri></item></addresses>
    <begindate>01/06/2024</begindate><enddate>30/06/2024</enddate><proxhour>10.00</proxhour>
    <gmapx>41.3755</gmapx><gmapy>2.1360</gmapy>
  </item></row>
  <row num="3"><item>
    <name>Teatre al carrer</name>
    <addresses><item><address>Carrer Gran de Gràcia, 190</address><barri>GRÀCIA</barri></item></addresses>
    <begindate>20/06/2024</begindate><enddate>21/06/2024</enddate><proxhour>19.00</proxhour>
    <gmapx>41.3802</gmapx><gmapy>2.1702</gmapy>
  </item></row>
</actes></resultat></body></response>"#;

const BICING: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<bicing_stations>
  <station><id>1</id><lat>41.381</lat><long>2.171</long><street>Carrer A</street><bikes>3</bikes><slots>0</slots></station>
  <station><id>2</id><lat>41.3801</lat><long>2.1701</long><street>Carrer B</street><bikes>0</bikes><slots>12</slots></station>
  <station><id>3</id><lat>41.3756</lat><long>2.1361</long><street>Carrer C</street><bikes>5</bikes><slots>5</slots></station>
  <station><id>4</id><lat>41.40</lat><long>2.17</long><street>Carrer D</street><bikes>9</bikes><slots>9</slots></station>
</bicing_stations>"#;

const PARKINGS: &str = r#"<response><row><item>
  <name>Aparcament Verdi</name>
  <addresses><item><address>Carrer de Verdi, 20</address></item></addresses>
  <gmapx>41.3803</gmapx><gmapy>2.1700</gmapy>
</item></row></response>"#;

fn build_pipeline(filter: Option<FilterSpec>) -> MatchPipeline {
    let stations = parse_stations(BICING).unwrap();
    let parkings = parse_parkings(PARKINGS).unwrap();
    let configs = standard_configs(stations, parkings, ProximityMatcher::default());
    MatchPipeline::from_spec(filter.as_ref(), configs).unwrap()
}

#[test]
fn test_integration_end_to_end_matching() {
    let events = parse_events(AGENDA).unwrap();
    assert_eq!(events.len(), 3);

    let enriched = build_pipeline(None).run(&events).unwrap();

    assert_eq!(enriched.len(), 3);

    let plaza = &enriched[0];
    let bikes: Vec<&str> = plaza
        .neighbors(FIELD_BICING_BIKES)
        .iter()
        .map(|n| match &n.point {
            agenda_algo::PointOfInterest::Station(s) => s.id.as_str(),
            agenda_algo::PointOfInterest::Parking(p) => p.name.as_str(),
        })
        .collect();
    // Station 2 is nearer but has no bikes; station 4 is ~2 km away
    assert_eq!(bikes, vec!["1"]);
    assert_eq!(plaza.neighbors(FIELD_BICING_SLOTS).len(), 1);
    assert_eq!(plaza.neighbors(FIELD_PARKINGS).len(), 1);

    // The Sants event only sees the Sants station
    let sants = &enriched[1];
    assert_eq!(sants.neighbors(FIELD_BICING_BIKES).len(), 1);
    assert!(sants.neighbors(FIELD_BICING_SLOTS).len() == 1);
    assert!(sants.neighbors(FIELD_PARKINGS).is_empty());

    for event in &enriched {
        for field in [FIELD_BICING_BIKES, FIELD_BICING_SLOTS, FIELD_PARKINGS] {
            let list = event.neighbors(field);
            assert!(list.len() <= 5);
            assert!(list.iter().all(|n| n.distance_meters <= 500.0));
            assert!(list.windows(2).all(|w| w[0].distance_meters <= w[1].distance_meters));
        }
    }
}

#[test]
fn test_integration_cli_expressions() {
    let events = parse_events(AGENDA).unwrap();

    let key = key_filter(&parse_literal("('gràcia', 'sants')").unwrap());
    let date = date_filter(&parse_literal("['11/06/2024', ('25/06/2024', 1, 1)]").unwrap());
    let enriched = build_pipeline(FilterSpec::combine(Some(key), Some(date)))
        .run(&events)
        .unwrap();

    let names: Vec<&str> = enriched.iter().map(|e| e.event.name.as_str()).collect();
    assert_eq!(names, vec!["Concert a la plaça", "Exposició de fotografia"]);
}

#[test]
fn test_integration_date_window() {
    let events = parse_events(AGENDA).unwrap();

    let date = date_filter(&parse_literal("('15/06/2024', 2, 2)").unwrap());
    let enriched = build_pipeline(Some(date)).run(&events).unwrap();

    // Only the month-long exhibition overlaps 13/06..17/06
    assert_eq!(enriched.len(), 1);
    assert_eq!(enriched[0].event.name, "Exposició de fotografia");
}

#[test]
fn test_integration_report_serialization() {
    let events = parse_events(AGENDA).unwrap();
    let enriched = build_pipeline(None).run(&events).unwrap();
    let report = MatchReport::new(events.len(), enriched);

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["total_events"], 3);
    assert_eq!(json["matched_events"], 3);
    let first = &json["events"][0];
    assert_eq!(first["neighborhood"], "la Vila de Gràcia");
    let station = &first["neighbors"][FIELD_BICING_BIKES][0];
    assert_eq!(station["kind"], "station");
    assert_eq!(station["id"], "1");
    assert!(station["distanceMeters"].as_f64().unwrap() > 0.0);
    assert!(station.get("unresolved").is_none());
}

#[test]
fn test_integration_unresolved_neighbor_is_flagged_in_report() {
    let events = parse_events(AGENDA).unwrap();
    let mut parkings = parse_parkings(PARKINGS).unwrap();
    parkings[0].latitude.clear();
    let configs = standard_configs(vec![], parkings, ProximityMatcher::default());
    let enriched = MatchPipeline::new(None, configs).run(&events[..1]).unwrap();

    let json = serde_json::to_value(MatchReport::new(1, enriched)).unwrap();

    let parking = &json["events"][0]["neighbors"][FIELD_PARKINGS][0];
    assert_eq!(parking["distanceMeters"], 0.0);
    assert_eq!(parking["unresolved"], true);
}

#[test]
fn test_integration_feeds_from_files() {
    let dir = std::env::temp_dir().join(format!("agenda-algo-feeds-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let agenda_path = dir.join("agenda.xml");
    let bicing_path = dir.join("bicing.xml");
    std::fs::write(&agenda_path, AGENDA).unwrap();
    std::fs::write(&bicing_path, BICING).unwrap();

    let client = FeedClient::new(Duration::from_secs(5)).unwrap();
    let events = tokio_test::block_on(client.events(agenda_path.to_str().unwrap())).unwrap();
    let stations = tokio_test::block_on(client.stations(bicing_path.to_str().unwrap())).unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert_eq!(events.len(), 3);
    assert_eq!(stations.len(), 4);
}
