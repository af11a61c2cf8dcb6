//! Pose chain demo — walks a small frame tree.
//!
//! Builds `world → base → sensor` from Euler angles and translations,
//! composes them, recovers the sensor pose relative to the base, and
//! averages two sensor readings that straddle a half turn in yaw.
//!
//! An optional first argument names a JSON file holding a
//! [`KernelConfig`]; missing fields keep their defaults.
//!
//! Set `RUST_LOG=pose_math=trace` to see the guarded degenerate branches.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pose_math::{AngleUnit, EulerAngles, Hmat, KernelConfig, Quaternion, RotationOrder, Vector3};

fn load_config() -> Result<KernelConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(KernelConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn yaw_pitch_roll(yaw: f64, pitch: f64, roll: f64) -> Quaternion {
    Quaternion::from_euler(EulerAngles::new(
        roll,
        pitch,
        yaw,
        RotationOrder::Zyx,
        AngleUnit::Degrees,
    ))
}

fn log_pose(label: &str, h: &Hmat) {
    let e = h.quat.to_euler_zyx().to_degrees();
    info!(
        pose = label,
        x = h.pos.x,
        y = h.pos.y,
        z = h.pos.z,
        roll = e.x,
        pitch = e.y,
        yaw = e.z,
        "pose"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("pose_chain=info".parse()?))
        .init();

    let config = load_config()?;
    info!(?config, "kernel config");

    let h_world2base = Hmat::try_new_with(
        yaw_pitch_roll(90.0, 0.0, 0.0),
        Vector3::new(2.0, 0.0, 0.0),
        &config,
    )?;
    let h_base2sensor = Hmat::try_new_with(
        yaw_pitch_roll(0.0, 15.0, 0.0),
        Vector3::new(0.0, 0.0, 0.5),
        &config,
    )?;

    let h_world2sensor = h_world2base * h_base2sensor;
    log_pose("world->sensor", &h_world2sensor);

    let recovered = Hmat::relative(h_world2sensor, h_world2base);
    log_pose("base->sensor (recovered)", &recovered);

    log_pose("sensor->world", &h_world2sensor.inverse());

    let reading_a = Hmat::new(yaw_pitch_roll(170.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
    let reading_b = Hmat::new(yaw_pitch_roll(-170.0, 0.0, 0.0), Vector3::new(3.0, 1.0, 0.0));
    log_pose("averaged reading", &Hmat::average(reading_b, reading_a));

    let aa = h_world2sensor.quat.to_axis_angle_with(&config).wrapped();
    info!(
        axis_x = aa.axis.x,
        axis_y = aa.axis.y,
        axis_z = aa.axis.z,
        angle_deg = aa.angle.to_degrees(),
        "world->sensor axis-angle"
    );

    Ok(())
}
