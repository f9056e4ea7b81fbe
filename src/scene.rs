//! Explicit application state for an interactive session.
//!
//! [`Scene`] owns the charge list, the feature toggles, the dynamics clock and the tunables.
//! The field computations stay free functions over `&[Charge]`; the scene only decides which
//! of them run and hands them a snapshot.

use std::fmt;

use crate::config::FieldConfig;
use crate::contours::{equipotentials, LevelContours};
use crate::errors::FieldError;
use crate::fields::{Charge, ChargeId, FieldLine, FieldLineTracer};
use crate::force::{coulomb_force, CoulombForce};
use crate::math::{distance, R2, Scalar};
use crate::presets::Preset;
use crate::simulation::ElectrostaticDynamics;
use crate::vectors::{FieldSample, VectorFieldSampler};
use crate::view::ViewSettings;

type ChangeListener = Box<dyn Fn(&[Charge]) + Send + Sync + 'static>;

/// Geometry for one rendered frame. Disabled features are left empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameGeometry {
    /// Traced field lines.
    pub field_lines: Vec<FieldLine>,
    /// Equipotential segments grouped by level.
    pub equipotentials: Vec<LevelContours>,
    /// Vector-field arrows.
    pub vectors: Vec<FieldSample>,
}

/// Charges, view toggles and dynamics state of one session.
pub struct Scene {
    charges: Vec<Charge>,
    next_id: u64,
    config: FieldConfig,
    view: ViewSettings,
    dynamics: ElectrostaticDynamics,
    running: bool,
    listeners: Vec<ChangeListener>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("charges", &self.charges)
            .field("next_id", &self.next_id)
            .field("config", &self.config)
            .field("view", &self.view)
            .field("dynamics", &self.dynamics)
            .field("running", &self.running)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_valid_config(FieldConfig::default())
    }
}

impl Scene {
    /// Empty scene with the stock tunables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene with custom tunables.
    pub fn with_config(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: FieldConfig) -> Self {
        Self {
            charges: Vec::new(),
            next_id: 1,
            config,
            view: ViewSettings::default(),
            dynamics: ElectrostaticDynamics::new(config.dynamics),
            running: false,
            listeners: Vec::new(),
        }
    }

    /// Current tunables.
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Feature toggles.
    #[must_use]
    pub const fn view(&self) -> &ViewSettings {
        &self.view
    }

    /// Mutable feature toggles.
    pub fn view_mut(&mut self) -> &mut ViewSettings {
        &mut self.view
    }

    /// Snapshot of the charges, in insertion order.
    #[must_use]
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    /// Charge with the given id.
    #[must_use]
    pub fn charge(&self, id: ChargeId) -> Option<&Charge> {
        self.charges.iter().find(|c| c.id == id)
    }

    /// Registers a callback run after every change to the charge list.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&[Charge]) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.charges);
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn charge_mut(&mut self, id: ChargeId) -> Result<&mut Charge, FieldError> {
        self.charges.iter_mut().find(|c| c.id == id).ok_or(FieldError::UnknownCharge(id))
    }

    /// Places a new charge at `position` and returns its id.
    pub fn add_charge(&mut self, position: R2, q: Scalar) -> ChargeId {
        let charge = Charge::new(self.allocate_id(), position.x, position.y, q);
        let id = charge.id;
        self.charges.push(charge);
        self.notify();
        id
    }

    /// Removes and returns a charge.
    pub fn remove_charge(&mut self, id: ChargeId) -> Result<Charge, FieldError> {
        let index = self.charges.iter().position(|c| c.id == id).ok_or(FieldError::UnknownCharge(id))?;
        let removed = self.charges.remove(index);
        self.notify();
        Ok(removed)
    }

    /// Removes every charge. Ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.charges.clear();
        log::debug!("cleared all charges");
        self.notify();
    }

    /// Replaces the charges with a preset layout, assigning fresh ids.
    pub fn load_preset(&mut self, preset: Preset) {
        let charges: Vec<Charge> = preset
            .charges()
            .iter()
            .map(|spec| Charge::new(self.allocate_id(), spec.x, spec.y, spec.q))
            .collect();
        self.charges = charges;
        log::debug!("loaded preset {preset} ({} charges)", self.charges.len());
        self.notify();
    }

    /// [`load_preset`](Self::load_preset) by menu identifier.
    pub fn load_preset_by_name(&mut self, name: &str) -> Result<(), FieldError> {
        let preset: Preset = name.parse()?;
        self.load_preset(preset);
        Ok(())
    }

    /// Top-most charge whose display circle contains `point`; later charges win ties.
    #[must_use]
    pub fn charge_at(&self, point: R2) -> Option<ChargeId> {
        self.charges
            .iter()
            .rev()
            .find(|c| distance(&point, &c.position) <= self.config.radius.radius(c.q))
            .map(|c| c.id)
    }

    /// Drags a charge to `position`.
    pub fn move_charge(&mut self, id: ChargeId, position: R2) -> Result<(), FieldError> {
        self.charge_mut(id)?.position = position;
        self.notify();
        Ok(())
    }

    /// Changes a charge's magnitude.
    pub fn set_charge_value(&mut self, id: ChargeId, q: Scalar) -> Result<(), FieldError> {
        self.charge_mut(id)?.q = q;
        self.notify();
        Ok(())
    }

    /// Pins or releases a charge for the dynamics step.
    pub fn set_fixed(&mut self, id: ChargeId, fixed: bool) -> Result<(), FieldError> {
        let charge = self.charge_mut(id)?;
        charge.fixed = fixed;
        if fixed {
            charge.velocity = R2::zeros();
        }
        self.notify();
        Ok(())
    }

    /// True while [`tick`](Self::tick) advances the dynamics.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or pauses the dynamics and returns the new state.
    pub fn toggle_simulation(&mut self) -> bool {
        self.running = !self.running;
        log::debug!("simulation {}", if self.running { "started" } else { "paused" });
        self.running
    }

    /// Simulated seconds elapsed while running.
    #[must_use]
    pub const fn simulation_time(&self) -> Scalar {
        self.dynamics.elapsed()
    }

    /// Advances the dynamics by one step if running. Returns whether anything was stepped.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.dynamics.step(&mut self.charges);
        self.notify();
        true
    }

    /// Coulomb force between two distinct charges for the force inspector.
    pub fn force_between(&self, a: ChargeId, b: ChargeId) -> Result<CoulombForce, FieldError> {
        if a == b {
            return Err(FieldError::SameCharge(a));
        }
        let first = self.charge(a).ok_or(FieldError::UnknownCharge(a))?;
        let second = self.charge(b).ok_or(FieldError::UnknownCharge(b))?;
        Ok(coulomb_force(first, second))
    }

    /// Compact description of ids, positions (0.1 px) and magnitudes (0.001), for render caches.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        if self.charges.is_empty() {
            return "empty".to_owned();
        }
        self.charges
            .iter()
            .map(|c| format!("{}:{:.1}:{:.1}:{:.3}", c.id.0, c.position.x, c.position.y, c.q))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Runs the enabled features over a `width × height` world viewport.
    #[must_use]
    pub fn frame(&self, width: Scalar, height: Scalar) -> FrameGeometry {
        let config = &self.config;
        let mut frame = FrameGeometry::default();
        if self.view.show_field_lines {
            frame.field_lines = FieldLineTracer::new(config.tracer, config.radius).trace(&self.charges, width, height);
        }
        if self.view.show_equipotentials {
            frame.equipotentials = equipotentials(&self.charges, width, height, &config.contours, &config.radius);
        }
        if self.view.show_vectors {
            frame.vectors = VectorFieldSampler::new(config.vectors, config.radius).sample_auto(&self.charges, width, height);
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ids_increase_across_presets_and_clears() {
        let mut scene = Scene::new();
        let first = scene.add_charge(R2::new(10.0, 10.0), 1.0);
        scene.clear();
        scene.load_preset(Preset::Dipole);
        let ids: Vec<_> = scene.charges().iter().map(|c| c.id).collect();
        assert_eq!(first, ChargeId(1));
        assert_eq!(ids, vec![ChargeId(2), ChargeId(3)]);
        assert_eq!(scene.charges()[1].number, 3);
    }

    #[test]
    fn hit_test_prefers_latest_charge() {
        let mut scene = Scene::new();
        let below = scene.add_charge(R2::new(100.0, 100.0), 1.0);
        let above = scene.add_charge(R2::new(104.0, 100.0), 1.0);
        assert_eq!(scene.charge_at(R2::new(102.0, 100.0)), Some(above));
        assert_eq!(scene.charge_at(R2::new(93.0, 100.0)), Some(below));
        assert_eq!(scene.charge_at(R2::new(300.0, 300.0)), None);
    }

    #[test]
    fn force_inspector_rejects_bad_selections() {
        let mut scene = Scene::new();
        let a = scene.add_charge(R2::new(0.0, 0.0), 1.0);
        assert!(matches!(scene.force_between(a, a), Err(FieldError::SameCharge(id)) if id == a));
        assert!(matches!(
            scene.force_between(a, ChargeId(99)),
            Err(FieldError::UnknownCharge(ChargeId(99)))
        ));
        let b = scene.add_charge(R2::new(80.0, 0.0), -1.0);
        assert!(scene.force_between(a, b).expect("two charges").is_point_charge_valid);
    }

    #[test]
    fn listeners_see_every_change() {
        let mut scene = Scene::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        scene.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let id = scene.add_charge(R2::new(1.0, 1.0), 1.0);
        scene.move_charge(id, R2::new(2.0, 2.0)).expect("known charge");
        scene.set_charge_value(id, -2.0).expect("known charge");
        scene.remove_charge(id).expect("known charge");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(scene.move_charge(id, R2::zeros()).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn tick_only_moves_when_running() {
        let mut scene = Scene::new();
        scene.add_charge(R2::new(100.0, 100.0), 1.0e-9);
        scene.add_charge(R2::new(200.0, 100.0), 1.0e-9);
        let before = scene.fingerprint();
        assert!(!scene.tick());
        assert_eq!(scene.fingerprint(), before);
        assert!(scene.toggle_simulation());
        for _ in 0..30 {
            scene.tick();
        }
        assert!(scene.charges()[0].position.x < 100.0);
        assert!(scene.simulation_time() > 0.0);
    }

    #[test]
    fn fixing_a_charge_stops_it() {
        let mut scene = Scene::new();
        let a = scene.add_charge(R2::new(100.0, 100.0), 1.0e-6);
        scene.add_charge(R2::new(200.0, 100.0), 1.0e-6);
        scene.toggle_simulation();
        scene.tick();
        assert!(scene.charge(a).expect("known charge").velocity.x < 0.0);

        scene.set_fixed(a, true).expect("known charge");
        let pinned = scene.charge(a).expect("known charge").clone();
        assert!(pinned.fixed);
        assert_eq!(pinned.velocity, R2::zeros());
        scene.tick();
        assert_eq!(scene.charge(a).expect("known charge").position, pinned.position);
        assert!(matches!(scene.set_fixed(ChargeId(42), true), Err(FieldError::UnknownCharge(ChargeId(42)))));
    }

    #[test]
    fn unknown_preset_name_leaves_charges_alone() {
        let mut scene = Scene::new();
        scene.load_preset_by_name("capacitor").expect("known preset");
        let before = scene.fingerprint();
        let err = scene.load_preset_by_name("tripole").unwrap_err();
        assert!(matches!(err, FieldError::UnknownPreset(ref name) if name == "tripole"));
        assert_eq!(scene.fingerprint(), before);
    }

    #[test]
    fn frame_respects_toggles() {
        let mut scene = Scene::new();
        scene.load_preset(Preset::Dipole);
        let frame = scene.frame(800.0, 400.0);
        assert_eq!(frame.field_lines.len(), 32);
        assert!(frame.equipotentials.is_empty());
        assert!(frame.vectors.is_empty());

        let view = scene.view_mut();
        view.show_field_lines = false;
        view.show_equipotentials = true;
        view.show_vectors = true;
        let frame = scene.frame(800.0, 400.0);
        assert!(frame.field_lines.is_empty());
        assert_eq!(frame.equipotentials.len(), 16);
        assert!(!frame.vectors.is_empty());
    }

    #[test]
    fn fingerprint_tracks_positions() {
        let mut scene = Scene::new();
        assert_eq!(scene.fingerprint(), "empty");
        let id = scene.add_charge(R2::new(1.04, 2.0), 1.0);
        assert_eq!(scene.fingerprint(), "1:1.0:2.0:1.000");
        scene.move_charge(id, R2::new(1.5, 2.0)).expect("known charge");
        assert_eq!(scene.fingerprint(), "1:1.5:2.0:1.000");
    }
}
