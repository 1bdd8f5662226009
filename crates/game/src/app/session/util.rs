// Unit-length x/z direction from the held movement keys; forward is -z.
fn movement_direction(input: &InputSnapshot) -> (f32, f32) {
    let mut x = 0.0f32;
    let mut z = 0.0f32;

    if input.is_down(PlayerAction::MoveRight) {
        x += 1.0;
    }
    if input.is_down(PlayerAction::MoveLeft) {
        x -= 1.0;
    }
    if input.is_down(PlayerAction::MoveBackward) {
        z += 1.0;
    }
    if input.is_down(PlayerAction::MoveForward) {
        z -= 1.0;
    }

    let len_sq = x * x + z * z;
    if len_sq > 0.0 {
        let inv_len = len_sq.sqrt().recip();
        x *= inv_len;
        z *= inv_len;
    }

    (x, z)
}

fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// "memory_garden" renders as "memory garden".
fn display_name_from_area_id(area_id: &str) -> String {
    area_id.replace('_', " ")
}
