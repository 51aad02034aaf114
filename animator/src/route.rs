use crate::GeoPoint;

/// An owned snapshot of a polyline to animate along, with lengths precomputed once.
#[derive(Clone, Debug)]
pub struct Route {
    // At least 2 points
    points: Vec<GeoPoint>,
    // segment_lengths[i] is the distance from points[i] to points[i + 1]
    segment_lengths: Vec<f64>,
    // cumulative[i] is the distance along the route to points[i], so cumulative[0] is 0 and the
    // last entry is the total length
    cumulative: Vec<f64>,
}

impl Route {
    /// Copies the points. None if there aren't at least 2 of them.
    pub fn new(points: &[GeoPoint]) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let points = points.to_vec();

        let mut segment_lengths = Vec::with_capacity(points.len() - 1);
        let mut cumulative = Vec::with_capacity(points.len());
        let mut dist_so_far = 0.0;
        cumulative.push(dist_so_far);
        for pair in points.windows(2) {
            let length = pair[0].dist_to(pair[1]);
            segment_lengths.push(length);
            dist_so_far += length;
            cumulative.push(dist_so_far);
        }

        Some(Self {
            points,
            segment_lengths,
            cumulative,
        })
    }

    pub fn first_pt(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn last_pt(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    pub fn total_length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    pub fn segment_lengths(&self) -> &[f64] {
        &self.segment_lengths
    }

    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative
    }

    /// The position some distance along the route. Clamped to the endpoints.
    pub fn position_at(&self, dist_along: f64) -> GeoPoint {
        if !(dist_along > 0.0) {
            return self.first_pt();
        }
        if dist_along >= self.total_length() {
            return self.last_pt();
        }

        let idx = self.segment_at(dist_along);
        let length = self.segment_lengths[idx];
        let ratio = if length > 0.0 {
            (dist_along - self.cumulative[idx]) / length
        } else {
            0.0
        };
        self.points[idx].lerp(self.points[idx + 1], ratio.clamp(0.0, 1.0))
    }

    // The segment i with cumulative[i] <= dist_along <= cumulative[i + 1]. Zero-length segments
    // are skipped past, since the first segment with cumulative[i + 1] >= dist_along wins.
    fn segment_at(&self, dist_along: f64) -> usize {
        let ends = &self.cumulative[1..];
        ends.partition_point(|end| *end < dist_along)
            .min(self.segment_lengths.len() - 1)
    }
}
