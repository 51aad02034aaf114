use anyhow::{Context, Result};
use serde::Deserialize;

use animator::{parse_points, GeoPoint, SlotName, TargetSet};

/// The rescue routes as the planner returns them, plus the victims they were planned for.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlan {
    base_location: Option<String>,
    #[serde(default)]
    victim_locations: Vec<String>,
    routes: Vec<RawRoute>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    team_name: String,
    #[serde(default)]
    route_description: String,
    route_coordinates: Vec<String>,
    #[serde(default)]
    travelling_duration: String,
    #[serde(default)]
    priority: String,
}

pub struct RescuePlan {
    pub base: Option<GeoPoint>,
    pub victims: TargetSet,
    pub routes: Vec<TeamRoute>,
}

pub struct TeamRoute {
    pub team: SlotName,
    pub description: String,
    pub points: Vec<GeoPoint>,
    pub travelling_duration: String,
    pub priority: String,
}

impl RescuePlan {
    pub fn load(path: &str) -> Result<Self> {
        let raw = fs_err::read_to_string(path)?;
        Self::parse(&raw).with_context(|| format!("loading {}", path))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw: RawPlan = serde_json::from_str(raw)?;

        let base = match raw.base_location {
            Some(x) => Some(x.parse::<GeoPoint>().context("baseLocation")?),
            None => None,
        };
        let victims = parse_points(&raw.victim_locations).context("victimLocations")?;

        let mut routes: Vec<TeamRoute> = Vec::new();
        for route in raw.routes {
            if routes.iter().any(|r| r.team.0 == route.team_name) {
                bail!("{} has more than one route", route.team_name);
            }
            let points = parse_points(&route.route_coordinates)
                .with_context(|| format!("routeCoordinates of {}", route.team_name))?;
            if points.len() < 2 {
                warn!(
                    "{} only has {} route points; it won't move",
                    route.team_name,
                    points.len()
                );
            }
            routes.push(TeamRoute {
                team: SlotName(route.team_name),
                description: route.route_description,
                points,
                travelling_duration: route.travelling_duration,
                priority: route.priority,
            });
        }

        Ok(Self {
            base,
            victims: TargetSet::new(victims),
            routes,
        })
    }
}
