/// Per-tick movement state for the player avatar. The controller owns
/// horizontal drive, vertical impulses, gravity while not flying, and
/// ground clamping; everything else belongs to the physics collaborator.
struct PlayerRig {
    velocity: Vec3,
    camera_position: Vec3,
    flying: bool,
    swimming: bool,
    crouching: bool,
    running: bool,
    energy: f32,
}

impl PlayerRig {
    fn new(spawn: Vec3) -> Self {
        Self {
            velocity: Vec3::default(),
            camera_position: camera_target(spawn),
            flying: false,
            swimming: false,
            crouching: false,
            running: false,
            energy: ENERGY_MAX,
        }
    }

    fn active_speed(&self) -> f32 {
        if self.running {
            RUN_SPEED_UNITS_PER_SECOND
        } else if self.crouching {
            CROUCH_SPEED_UNITS_PER_SECOND
        } else {
            WALK_SPEED_UNITS_PER_SECOND
        }
    }

    fn tick(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        position: &mut Vec3,
        world: &mut WorldRegistry,
    ) -> Vec<WorldObject> {
        // Postures first; the speed constant depends on them. Run is
        // suppressed while crouching, crouch while flying.
        self.flying = input.is_down(PlayerAction::Fly);
        self.crouching = input.is_down(PlayerAction::Crouch) && !self.flying;
        self.running = input.is_down(PlayerAction::Run) && !self.crouching;
        self.swimming = position.y < WATER_SUBMERSION_THRESHOLD;

        let (direction_x, direction_z) = movement_direction(input);
        let speed = self.active_speed();
        self.velocity.x = direction_x * speed;
        self.velocity.z = direction_z * speed;

        if self.flying {
            // Fly mode drives vertical velocity directly and suspends
            // gravity until the key is released.
            self.velocity.y = if input.is_down(PlayerAction::Jump) {
                FLY_IMPULSE_UNITS_PER_SECOND
            } else if input.is_down(PlayerAction::Crouch) {
                -FLY_IMPULSE_UNITS_PER_SECOND
            } else {
                0.0
            };
        } else {
            if input.pressed(PlayerAction::Jump) {
                self.velocity.y = JUMP_IMPULSE_UNITS_PER_SECOND;
            }
            if self.swimming && input.is_down(PlayerAction::Swim) {
                self.velocity.y = SWIM_IMPULSE_UNITS_PER_SECOND;
            }
            self.velocity.y += GRAVITY_UNITS_PER_SECOND_SQUARED * fixed_dt_seconds;
        }

        position.x += self.velocity.x * fixed_dt_seconds;
        position.y += self.velocity.y * fixed_dt_seconds;
        position.z += self.velocity.z * fixed_dt_seconds;

        let ground = world.ground_level(position.x, position.z);
        if position.y <= ground {
            position.y = ground;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }

        self.tick_energy(fixed_dt_seconds);
        self.follow_camera(*position);

        if input.pressed(PlayerAction::Interact) {
            world.collect_within(*position, PICKUP_RADIUS_UNITS)
        } else {
            Vec::new()
        }
    }

    fn tick_energy(&mut self, fixed_dt_seconds: f32) {
        if self.running || self.flying {
            self.energy = (self.energy - ENERGY_DRAIN_PER_SECOND * fixed_dt_seconds).max(0.0);
        } else {
            self.energy =
                (self.energy + ENERGY_RECOVERY_PER_SECOND * fixed_dt_seconds).min(ENERGY_MAX);
        }
    }

    // Third-person follow: smoothed toward a fixed offset behind and
    // above the player, recomputed every tick.
    fn follow_camera(&mut self, player_position: Vec3) {
        let target = camera_target(player_position);
        self.camera_position.x = lerp(self.camera_position.x, target.x, CAMERA_LERP_FACTOR);
        self.camera_position.y = lerp(self.camera_position.y, target.y, CAMERA_LERP_FACTOR);
        self.camera_position.z = lerp(self.camera_position.z, target.z, CAMERA_LERP_FACTOR);
    }
}

fn camera_target(player_position: Vec3) -> Vec3 {
    Vec3::new(
        player_position.x + CAMERA_OFFSET_X,
        player_position.y + CAMERA_OFFSET_Y,
        player_position.z + CAMERA_OFFSET_Z,
    )
}
