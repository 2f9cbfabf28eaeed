use crate::core::parse_date;
use crate::models::{Event, Parking, Station};
use crate::services::xml::{parse_document, XmlElement};
use crate::services::FeedError;

/// Extract agenda events from the cultural agenda feed
///
/// Rows missing any required field are dropped, and so are rows whose begin
/// date falls after their end date. Dates that do not parse are kept as they
/// are and reported by the date filters.
pub fn parse_events(xml: &str) -> Result<Vec<Event>, FeedError> {
    let root = parse_document(xml)?;
    let rows = root.descendants("row");
    let events: Vec<Event> = rows
        .iter()
        .filter_map(|row| parse_event_row(row))
        .filter(has_ordered_dates)
        .collect();

    log_dropped("events", rows.len(), events.len());
    Ok(events)
}

fn parse_event_row(row: &XmlElement) -> Option<Event> {
    let item = row.children.first()?;
    let location = first_address(item)?;

    Some(Event {
        name: item.child_text("name")?.to_string(),
        address: location.child_text("address")?.to_string(),
        neighborhood: location.child_text("barri")?.to_string(),
        begin_date: item.child_text("begindate")?.to_string(),
        end_date: item.child_text("enddate")?.to_string(),
        time_of_day: item.child_text("proxhour")?.to_string(),
        latitude: item.child_text("gmapx")?.to_string(),
        longitude: item.child_text("gmapy")?.to_string(),
    })
}

fn has_ordered_dates(event: &Event) -> bool {
    match (parse_date(&event.begin_date), parse_date(&event.end_date)) {
        (Ok(begin), Ok(end)) if begin > end => {
            tracing::warn!(
                "Dropping event {:?}: begins {} after it ends {}",
                event.name,
                event.begin_date,
                event.end_date
            );
            false
        }
        _ => true,
    }
}

/// Extract bike-share stations from the station status feed
pub fn parse_stations(xml: &str) -> Result<Vec<Station>, FeedError> {
    let root = parse_document(xml)?;
    let nodes = root.descendants("station");
    let stations: Vec<Station> = nodes.iter().filter_map(|node| parse_station(node)).collect();

    log_dropped("stations", nodes.len(), stations.len());
    Ok(stations)
}

fn parse_station(node: &XmlElement) -> Option<Station> {
    Some(Station {
        id: node.child_text("id")?.to_string(),
        street: node.child_text("street")?.to_string(),
        latitude: node.child_text("lat")?.to_string(),
        longitude: node.child_text("long")?.to_string(),
        available_bikes: node.child_text("bikes")?.parse().ok()?,
        available_slots: node.child_text("slots")?.parse().ok()?,
    })
}

/// Extract parking lots from the municipal parkings feed
pub fn parse_parkings(xml: &str) -> Result<Vec<Parking>, FeedError> {
    let root = parse_document(xml)?;
    let rows = root.descendants("row");
    let parkings: Vec<Parking> = rows.iter().filter_map(|row| parse_parking_row(row)).collect();

    log_dropped("parkings", rows.len(), parkings.len());
    Ok(parkings)
}

fn parse_parking_row(row: &XmlElement) -> Option<Parking> {
    let item = row.children.first()?;
    let location = first_address(item)?;

    Some(Parking {
        name: item.child_text("name")?.to_string(),
        address: location.child_text("address")?.to_string(),
        latitude: item.child_text("gmapx")?.to_string(),
        longitude: item.child_text("gmapy")?.to_string(),
    })
}

fn first_address(item: &XmlElement) -> Option<&XmlElement> {
    item.child("addresses")?.children.first()
}

fn log_dropped(kind: &str, seen: usize, kept: usize) {
    if kept < seen {
        tracing::warn!("Dropped {} of {} {} with missing or inconsistent fields", seen - kept, seen, kind);
    }
    tracing::debug!("Parsed {} {}", kept, kind);
}
