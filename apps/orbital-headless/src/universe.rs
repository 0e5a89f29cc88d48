use orbital_core::{BBox, Orb, OrbIndex, Player, Point};

const PLAYER_RADIUS: f64 = 8.0;
const MAX_FUEL: f64 = 1000.0;
const TRAIL_LENGTH: usize = 40;
const ORBIT_RADIUS: f64 = 600.0;
const FUEL_BURN: f64 = 2.5;

/// A scripted stand-in for the game simulation: the player circles the
/// origin through a fixed lattice of stars, burning fuel as it goes.
pub struct Universe {
    pub player: Player,
    stars: Vec<Orb>,
    index: OrbIndex,
    tick: u64,
}

impl Universe {
    pub fn new(star_rows: i32, spacing: f64) -> Self {
        let mut stars = Vec::new();
        for i in -star_rows..=star_rows {
            for j in -star_rows..=star_rows {
                if (i + j) % 3 == 0 {
                    let radius = 3.0 + ((i * 7 + j * 13).rem_euclid(5)) as f64;
                    stars.push(Orb::star(
                        Point::new(i as f64 * spacing, j as f64 * spacing),
                        radius,
                    ));
                }
            }
        }
        let index = OrbIndex::build(&stars);
        log::info!("Universe seeded with {} stars", stars.len());
        Self {
            player: Player::new(
                Point::new(ORBIT_RADIUS, 0.0),
                PLAYER_RADIUS,
                MAX_FUEL,
                TRAIL_LENGTH,
            ),
            stars,
            index,
            tick: 0,
        }
    }

    pub fn step(&mut self) {
        self.tick += 1;
        let angle = self.tick as f64 * 0.02;
        self.player
            .move_to(Point::new(ORBIT_RADIUS * angle.cos(), ORBIT_RADIUS * angle.sin()));
        self.player.fuel = (self.player.fuel - FUEL_BURN).max(0.0);
    }

    /// The player followed by every star inside `bounds`.
    pub fn visible_orbs(&self, bounds: &BBox) -> Vec<Orb> {
        let mut orbs = Vec::with_capacity(self.stars.len() + 1);
        orbs.push(self.player.orb);
        orbs.extend(self.index.cull(&self.stars, bounds));
        orbs
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }
}
