use serde::{Deserialize, Serialize};

use super::style::{StyleRule, default_stylesheet};

/// Everything a mount needs besides the surface and the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
	/// Base rules, applied in order before per-element overrides.
	pub stylesheet: Vec<StyleRule>,
	/// Force simulation used by the automatic layout.
	pub simulation: SimulationConfig,
	/// Colour the surface is cleared to before each frame.
	pub background: String,
}

impl Default for RenderConfig {
	fn default() -> Self {
		Self {
			stylesheet: default_stylesheet(),
			simulation: SimulationConfig::default(),
			background: "#1a1a2e".into(),
		}
	}
}

impl RenderConfig {
	/// Parse a config; missing fields take their defaults.
	pub fn from_json(json: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Force simulation parameters, passed straight to the engine's simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring stiffness along edges.
	pub force_spring: f32,
	/// Cap on the force applied in one step.
	pub force_max: f32,
	/// Scale from force to displacement per step.
	pub node_speed: f32,
	/// Velocity kept per step, in `0..1`.
	pub damping_factor: f32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_defaults() {
		let config = RenderConfig::from_json(r#"{ "background": "white", "simulation": { "force_charge": 50 } }"#)
			.unwrap();
		assert_eq!(config.background, "white");
		assert_eq!(config.simulation.force_charge, 50.0);
		assert_eq!(config.simulation.damping_factor, 0.9);
		assert_eq!(config.stylesheet, default_stylesheet());
	}

	#[test]
	fn empty_stylesheet_is_respected() {
		let config = RenderConfig::from_json(r#"{ "stylesheet": [] }"#).unwrap();
		assert!(config.stylesheet.is_empty());
	}
}
