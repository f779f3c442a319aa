//! Predefined starting systems
//!
//! A scenario is nothing more than an ordered list of [`BodySpec`]s. Central
//! bodies are tagged as primaries; Earth and the Moon are both primaries in
//! the Earth-Moon system so that stray satellites crash into them rather than
//! the other way round.

use crate::physics::body::{BodyColor, BodySpec};
use crate::physics::math::{Scalar, Vector, orbital_state};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Scenario {
    /// Earth, the Moon and the ISS
    #[default]
    EarthMoon,
    /// The Sun and the eight planets
    SolarSystem,
    /// Jupiter and the Galilean moons
    JupiterSystem,
    /// Proxima Centauri and its three planets
    ProximaCentauri,
    /// Nothing at all
    Empty,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::EarthMoon,
        Scenario::SolarSystem,
        Scenario::JupiterSystem,
        Scenario::ProximaCentauri,
        Scenario::Empty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::EarthMoon => "earth_moon",
            Scenario::SolarSystem => "solar_system",
            Scenario::JupiterSystem => "jupiter_system",
            Scenario::ProximaCentauri => "proxima_centauri",
            Scenario::Empty => "empty",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::EarthMoon => "Earth-Moon System",
            Scenario::SolarSystem => "Solar System",
            Scenario::JupiterSystem => "Jupiter System",
            Scenario::ProximaCentauri => "Proxima Centauri",
            Scenario::Empty => "Empty Space",
        }
    }

    /// Initial bodies, in insertion order
    pub fn bodies(&self) -> Vec<BodySpec> {
        match self {
            Scenario::EarthMoon => vec![
                earth().primary(),
                moon().primary(),
                iss(),
            ],
            Scenario::SolarSystem => {
                let mut bodies = vec![sun().primary()];
                bodies.extend(PLANETS.iter().map(Template::spec));
                bodies
            }
            Scenario::JupiterSystem => {
                let mut bodies = vec![JUPITER.at_rest().primary()];
                bodies.extend(GALILEAN_MOONS.iter().map(Template::spec));
                bodies
            }
            Scenario::ProximaCentauri => {
                let mut bodies = vec![PROXIMA.at_rest().primary()];
                bodies.extend(PROXIMA_PLANETS.iter().map(Template::spec));
                bodies
            }
            Scenario::Empty => Vec::new(),
        }
    }

    /// Satellites that count toward the "Satellite-N" naming sequence
    pub fn initial_satellite_count(&self) -> u32 {
        match self {
            Scenario::EarthMoon => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named body with orbit parameters around its system's origin
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub radius: Scalar,
    pub mass: Scalar,
    /// Orbit radius in km
    pub distance: Scalar,
    pub angle_degrees: Scalar,
    /// Orbital speed in km/s
    pub speed: Scalar,
    pub color: BodyColor,
}

impl Template {
    pub fn spec(&self) -> BodySpec {
        let (position, velocity) = orbital_state(self.distance, self.angle_degrees, self.speed);
        self.at_rest().at(position).moving(velocity)
    }

    pub fn at_rest(&self) -> BodySpec {
        BodySpec::new(self.name, self.mass, self.radius).with_color(self.color)
    }
}

const fn template(
    name: &'static str,
    radius: Scalar,
    mass: Scalar,
    distance: Scalar,
    angle_degrees: Scalar,
    speed: Scalar,
    color: BodyColor,
) -> Template {
    Template {
        name,
        radius,
        mass,
        distance,
        angle_degrees,
        speed,
        color,
    }
}

const EARTH: Template = template("Earth", 6371.0, 5.972e24, 0.0, 0.0, 0.0, BodyColor(0, 100, 255));
const MOON: Template = template(
    "Moon",
    1737.4,
    7.34767309e22,
    384_400.0,
    0.0,
    1.022,
    BodyColor(200, 200, 200),
);
const ISS: Template = template("ISS", 0.1, 1000.0, 6771.0, 0.0, 7.66, BodyColor(255, 255, 0));
const SUN: Template = template("Sun", 696_340.0, 1.989e30, 0.0, 0.0, 0.0, BodyColor(255, 255, 100));

const PLANETS: [Template; 8] = [
    template("Mercury", 2439.7, 3.301e23, 57_909_050.0, 45.0, 47.36, BodyColor(150, 150, 150)),
    template("Venus", 6051.8, 4.867e24, 108_208_000.0, 120.0, 35.02, BodyColor(255, 200, 100)),
    template("Earth", 6371.0, 5.972e24, 149_597_870.0, 200.0, 29.78, BodyColor(0, 100, 255)),
    template("Mars", 3390.0, 6.39e23, 227_943_824.0, 300.0, 24.07, BodyColor(255, 100, 100)),
    template("Jupiter", 69_911.0, 1.898e27, 778_299_000.0, 80.0, 13.07, BodyColor(255, 200, 150)),
    template("Saturn", 58_232.0, 5.683e26, 1_429_400_000.0, 160.0, 9.68, BodyColor(255, 220, 150)),
    template("Uranus", 25_362.0, 8.681e25, 2_870_658_186.0, 240.0, 6.80, BodyColor(100, 200, 255)),
    template("Neptune", 24_622.0, 1.024e26, 4_498_396_441.0, 30.0, 5.43, BodyColor(50, 100, 255)),
];

const JUPITER: Template = template("Jupiter", 69_911.0, 1.898e27, 0.0, 0.0, 0.0, BodyColor(255, 200, 150));

const GALILEAN_MOONS: [Template; 4] = [
    template("Io", 1821.6, 8.93e22, 421_700.0, 90.0, 17.33, BodyColor(255, 255, 150)),
    template("Europa", 1560.8, 4.8e22, 671_034.0, 180.0, 13.74, BodyColor(200, 200, 255)),
    template("Ganymede", 2634.1, 1.48e23, 1_070_412.0, 270.0, 10.88, BodyColor(150, 150, 150)),
    template("Callisto", 2410.3, 1.08e23, 1_882_709.0, 45.0, 8.20, BodyColor(100, 100, 100)),
];

const PROXIMA: Template = template(
    "Proxima Centauri",
    100_000.0,
    2.446e29,
    0.0,
    0.0,
    0.0,
    BodyColor(255, 150, 100),
);

const PROXIMA_PLANETS: [Template; 3] = [
    template("Proxima b", 7160.0, 7.6e24, 7_500_000.0, 45.0, 46.7, BodyColor(100, 150, 200)),
    template("Proxima c", 10_000.0, 4.25e25, 22_350_000.0, 180.0, 27.0, BodyColor(150, 100, 80)),
    template("Proxima d", 3500.0, 1.2e24, 2_400_000.0, 270.0, 82.4, BodyColor(200, 100, 100)),
];

fn earth() -> BodySpec {
    EARTH.at_rest()
}

fn moon() -> BodySpec {
    MOON.spec()
}

fn iss() -> BodySpec {
    ISS.spec()
}

fn sun() -> BodySpec {
    SUN.at_rest()
}

/// Look up a named body, case-insensitively
///
/// Used when a user spawns a body by name: the template supplies mass,
/// radius and color; the caller supplies position and velocity.
pub fn template_by_name(name: &str) -> Option<Template> {
    let wanted = name.trim().to_lowercase();

    [EARTH, MOON, ISS, SUN, JUPITER, PROXIMA]
        .into_iter()
        .chain(PLANETS)
        .chain(GALILEAN_MOONS)
        .chain(PROXIMA_PLANETS)
        .find(|template| template.name.to_lowercase() == wanted)
}

/// Place a template body at an arbitrary point with an arbitrary velocity
pub fn spec_from_template(template: &Template, position: Vector, velocity: Vector) -> BodySpec {
    template.at_rest().at(position).moving(velocity)
}
