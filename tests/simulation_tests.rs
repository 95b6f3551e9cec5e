//! Integration tests for the particle simulator.
//!
//! These drive `ParticleSimulator` through its public API only, with fixed
//! seeds, and check the pool after every frame.

use spark_pool::prelude::*;
use spark_pool::{ParticleInit, SpawnRng};

fn assert_dead_slots_inert(pool: &ParticlePool) {
    for slot in 0..pool.capacity() {
        if !pool.is_alive(slot) {
            assert_eq!(pool.duration_ms(slot), 0.0, "slot {slot} duration");
            assert_eq!(pool.sizes()[slot], 0.0, "slot {slot} size");
            assert_eq!(pool.colors()[slot], Vec3::ZERO, "slot {slot} color");
        }
    }
}

/// One spawn per 100 ms frame into a single slot that lives ten frames.
fn single_slot() -> ParticleConfig {
    ParticleConfig::default()
        .with_pool_size(1)
        .with_lifespan_ms(1000.0)
        .with_emission_rate_hz(10.0)
}

// ============================================================================
// Capacity & Slot State
// ============================================================================

#[test]
fn test_alive_never_exceeds_pool_size() {
    let config = ParticleConfig::default()
        .with_pool_size(10)
        .with_lifespan_ms(400.0)
        .with_emission_rate_hz(1000.0);
    let mut sim = ParticleSimulator::with_seed(config, 1).unwrap();

    for frame in 0..500 {
        // Mix small and large steps.
        let dt = if frame % 7 == 0 { 120.0 } else { 16.0 };
        sim.advance(dt);
        assert!(sim.alive_count() <= 10);
        assert_eq!(sim.alive_count(), sim.pool().alive_slots().count());
    }
}

#[test]
fn test_dead_slots_stay_inert() {
    let config = ParticleConfig::smoke()
        .with_pool_size(32)
        .with_lifespan_ms(300.0)
        .with_emission_rate_hz(90.0);
    let mut sim = ParticleSimulator::with_seed(config, 2).unwrap();

    assert_dead_slots_inert(sim.pool());
    for _ in 0..400 {
        sim.advance(16.0);
        assert_dead_slots_inert(sim.pool());
    }
}

#[test]
fn test_pool_exhaustion_is_silent() {
    let config = ParticleConfig::default()
        .with_pool_size(3)
        .with_lifespan_ms(1_000_000.0)
        .with_emission_rate_hz(1000.0);
    let mut sim = ParticleSimulator::with_seed(config, 3).unwrap();

    for _ in 0..3 {
        sim.advance(10.0);
    }
    assert_eq!(sim.alive_count(), 3);
    assert!(sim.pool().is_exhausted());
    let positions_before = sim.pool().positions().to_vec();

    sim.advance(10.0);
    assert_eq!(sim.alive_count(), 3);
    assert_eq!(sim.pool().allocate(), None);
    // Existing particles still move.
    assert_ne!(sim.pool().positions(), positions_before.as_slice());
}

// ============================================================================
// Lifespan
// ============================================================================

#[test]
fn test_lifespan_boundary() {
    let mut sim = ParticleSimulator::with_seed(single_slot(), 4).unwrap();

    for update in 1..=9 {
        sim.advance(100.0);
        assert!(sim.pool().is_alive(0), "dead after update {update}");
        assert_eq!(sim.pool().duration_ms(0), 100.0 * update as f32);
    }

    sim.advance(100.0);
    assert!(!sim.pool().is_alive(0));
    assert_dead_slots_inert(sim.pool());
}

#[test]
fn test_slot_recycled_with_fresh_duration() {
    let mut sim = ParticleSimulator::with_seed(single_slot(), 5).unwrap();
    for _ in 0..10 {
        sim.advance(100.0);
    }
    assert!(!sim.pool().is_alive(0));

    sim.advance(100.0);
    assert!(sim.pool().is_alive(0));
    assert_eq!(sim.pool().duration_ms(0), 100.0);
}

// ============================================================================
// Emission Cadence
// ============================================================================

#[test]
fn test_emission_every_fifth_step() {
    // 20 Hz = one particle per 50 ms.
    let config = ParticleConfig::default().with_emission_rate_hz(20.0);
    let mut sim = ParticleSimulator::with_seed(config, 6).unwrap();

    for call in 1..=50 {
        sim.advance(10.0);
        assert_eq!(sim.alive_count(), call / 5, "after call {call}");
        if call % 5 == 0 {
            assert_eq!(sim.time_since_last_emission_ms(), 0.0);
        }
    }
}

#[test]
fn test_large_step_spawns_once() {
    let config = ParticleConfig::default().with_emission_rate_hz(20.0);
    let mut sim = ParticleSimulator::with_seed(config, 7).unwrap();

    // 200 ms covers four intervals but only one particle is spawned.
    sim.advance(200.0);
    assert_eq!(sim.alive_count(), 1);
    assert_eq!(sim.time_since_last_emission_ms(), 0.0);

    sim.advance(200.0);
    sim.advance(200.0);
    assert_eq!(sim.alive_count(), 3);
}

#[test]
fn test_zero_dt_does_nothing() {
    let mut sim = ParticleSimulator::with_seed(ParticleConfig::default(), 8).unwrap();
    for _ in 0..10 {
        sim.advance(0.0);
    }
    assert_eq!(sim.alive_count(), 0);
    assert!(sim.take_dirty().is_empty());
}

// ============================================================================
// Interpolation & Motion
// ============================================================================

#[test]
fn test_color_interpolation_midpoint() {
    let config = single_slot().with_color_delta(Vec3::ONE, Vec3::ZERO);
    let mut sim = ParticleSimulator::with_seed(config, 9).unwrap();

    // Update n interpolates with duration (n - 1) * 100 ms.
    for _ in 0..6 {
        sim.advance(100.0);
    }
    assert_eq!(sim.pool().colors()[0], Vec3::splat(0.5));
}

#[test]
fn test_color_fixed_without_delta() {
    let config = single_slot().with_color(Vec3::new(0.9, 0.5, 0.1));
    let mut sim = ParticleSimulator::with_seed(config, 10).unwrap();
    for _ in 0..9 {
        sim.advance(100.0);
        assert_eq!(sim.pool().colors()[0], Vec3::new(0.9, 0.5, 0.1));
    }
}

#[test]
fn test_cone_particles_rise_from_origin() {
    let config = ParticleConfig::default()
        .with_emission_volume(EmissionVolume::Cone)
        .with_pool_size(64)
        .with_emission_rate_hz(100.0);
    let mut sim = ParticleSimulator::with_seed(config, 11).unwrap();

    for _ in 0..64 {
        sim.advance(10.0);
    }
    let pool = sim.pool();
    for slot in pool.alive_slots() {
        assert!(pool.velocities()[slot].y >= 0.0);
        assert!(pool.positions()[slot].y >= 0.0);
    }
}

// ============================================================================
// Emission Volumes
// ============================================================================

#[test]
fn test_sphere_samples_within_radius() {
    let emitter = Emitter::Sphere {
        radius: 5.0,
        speed: 30.0,
    };
    let mut rng = SpawnRng::seeded(12);
    for _ in 0..10_000 {
        let r = emitter.sample(&mut rng).position.length();
        assert!(r > 0.0);
        assert!(r <= 5.0 + 1e-4);
    }
}

#[test]
fn test_cube_and_cylinder_fail_fast() {
    for kind in [EmissionVolume::Cube, EmissionVolume::Cylinder] {
        let config = ParticleConfig::default().with_emission_volume(kind);
        match ParticleSimulator::new(config) {
            Err(ConfigError::UnsupportedEmissionVolume(k)) => assert_eq!(k, kind),
            other => panic!("expected unsupported volume error, got {other:?}"),
        }
    }
}

// ============================================================================
// Render Boundary
// ============================================================================

#[test]
fn test_renderer_consumes_flags() {
    let config = single_slot().with_size_delta((10.0, 20.0), (1.0, 2.0));
    let mut sim = ParticleSimulator::with_seed(config, 13).unwrap();

    sim.advance(100.0);
    assert_eq!(sim.take_dirty(), DirtyBuffers::all());
    assert!(sim.pool().sync().peek().is_empty());

    sim.advance(100.0);
    assert_eq!(
        sim.take_dirty(),
        DirtyBuffers::POSITIONS | DirtyBuffers::SIZES
    );
}

#[test]
fn test_external_activation_matches_simulator_layout() {
    let mut pool = ParticlePool::new(2);
    pool.activate(
        1,
        &ParticleInit {
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::ZERO,
            start_size: 4.0,
            end_size: 1.0,
            color: Vec3::new(0.25, 0.5, 0.75),
        },
    );
    let floats: &[f32] = spark_pool::bytemuck::cast_slice(pool.position_bytes());
    assert_eq!(&floats[3..6], &[1.0, 2.0, 3.0]);
    let sizes: &[f32] = spark_pool::bytemuck::cast_slice(pool.size_bytes());
    assert_eq!(sizes, &[0.0, 4.0]);
}
