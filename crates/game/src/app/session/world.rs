#[derive(Debug, Clone, PartialEq)]
struct WorldObject {
    name: &'static str,
    kind: &'static str,
    position: Vec3,
}

impl WorldObject {
    fn into_item_seed(self) -> ItemSeed {
        ItemSeed {
            name: self.name.to_string(),
            kind: self.kind.to_string(),
            description: format!("A mystical {} found in the castle grounds.", self.kind),
        }
    }
}

// Axis-aligned basin on the x/z plane; the ground inside sits below the
// swim threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WaterRegion {
    center_x: f32,
    center_z: f32,
    half_width: f32,
    half_depth: f32,
}

impl WaterRegion {
    fn contains(self, x: f32, z: f32) -> bool {
        (x - self.center_x).abs() <= self.half_width && (z - self.center_z).abs() <= self.half_depth
    }
}

/// Registry of world content; the player controller queries this
/// instead of owning world knowledge of its own.
#[derive(Debug, Clone, PartialEq)]
struct WorldRegistry {
    objects: Vec<WorldObject>,
    water: Vec<WaterRegion>,
}

impl WorldRegistry {
    fn castle_grounds() -> Self {
        Self {
            objects: vec![
                WorldObject {
                    name: "Moonstone Crystal",
                    kind: "crystal",
                    position: Vec3::new(3.0, 0.5, 3.0),
                },
                WorldObject {
                    name: "Ancient Rune",
                    kind: "rune",
                    position: Vec3::new(-7.0, 0.5, 8.0),
                },
                WorldObject {
                    name: "Spirit Essence",
                    kind: "essence",
                    position: Vec3::new(12.0, 0.5, -5.0),
                },
                WorldObject {
                    name: "Memory Fragment",
                    kind: "memory",
                    position: Vec3::new(-3.0, 0.5, -8.0),
                },
            ],
            water: vec![
                WaterRegion {
                    center_x: 20.0,
                    center_z: 20.0,
                    half_width: 7.5,
                    half_depth: 7.5,
                },
                WaterRegion {
                    center_x: -20.0,
                    center_z: 20.0,
                    half_width: 5.0,
                    half_depth: 5.0,
                },
            ],
        }
    }

    fn ground_level(&self, x: f32, z: f32) -> f32 {
        if self.water.iter().any(|region| region.contains(x, z)) {
            WATER_BED_LEVEL
        } else {
            GROUND_LEVEL
        }
    }

    // Collected objects leave the registry and do not reappear.
    fn collect_within(&mut self, position: Vec3, radius: f32) -> Vec<WorldObject> {
        let mut collected = Vec::new();
        let mut index = 0;
        while index < self.objects.len() {
            if self.objects[index].position.distance_to(position) < radius {
                collected.push(self.objects.remove(index));
            } else {
                index += 1;
            }
        }
        collected
    }

    #[allow(dead_code)]
    fn remaining_objects(&self) -> usize {
        self.objects.len()
    }

    fn area_for_position(&self, position: Vec3) -> &'static str {
        if position.x.abs() < 5.0 && (position.z + 10.0).abs() < 5.0 {
            ENTRANCE_AREA_ID
        } else if position.x < -10.0 {
            "thornwood_forest"
        } else if position.x > 10.0 {
            "crystal_caverns"
        } else {
            "unknown_location"
        }
    }
}
