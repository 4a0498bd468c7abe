//! Output formatting for the final matched record

use link_snap_lib::LinkResult;

/// Render the final record: a header line followed by the distance in
/// meters and the nearest point's coordinates in decimal degrees
pub fn render(result: &LinkResult) -> String {
    format!(
        "distance_meters,nearest_longitude,nearest_latitude\n{},{},{}\n",
        result.distance_m,
        result.nearest.x(),
        result.nearest.y()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use link_snap_lib::Direction;

    #[test]
    fn test_render() {
        let result = LinkResult {
            link_id: "a".to_string(),
            distance_m: 12.5,
            nearest: Point::new(16.25, 48.5),
            direction: Direction::Approaching,
            within_segment: true,
            segment_index: 0,
            positions: vec![Point::new(16.0, 48.0), Point::new(17.0, 49.0)],
        };

        let rendered = render(&result);
        let mut lines = rendered.lines();
        assert_eq!(
            lines.next(),
            Some("distance_meters,nearest_longitude,nearest_latitude")
        );
        assert_eq!(lines.next(), Some("12.5,16.25,48.5"));
    }
}
