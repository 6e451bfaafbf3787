//! Force-directed layout in two or three dimensions
//!
//! A spring-electrical simulation: every node pair repels, every edge acts as
//! a spring towards a rest length, and a weak gravity pulls nodes to the
//! origin. The simulation "temperature" (alpha) decays geometrically and the
//! run stops once it falls below `alpha_min`.
//!
//! The same simulation drives both dimensions through a const generic; only
//! the initial placement differs (circle in 2D, Fibonacci sphere in 3D).
//! Final positions are centered and rescaled into `[-1, 1]`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::network::Network;

/// Tuning parameters for the force simulation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Repulsion strength (negative = repulsion)
    pub charge: f32,
    /// Link distance (rest length)
    pub link_distance: f32,
    /// Link strength, divided by the smaller endpoint degree per edge
    pub link_strength: f32,
    /// Center force strength
    pub center_strength: f32,
    /// Fraction of velocity lost per tick (friction)
    pub velocity_decay: f32,
    /// Minimum alpha before stopping
    pub alpha_min: f32,
    /// Alpha decay rate per tick
    pub alpha_decay: f32,
    /// Hard cap on simulation ticks
    pub max_iterations: usize,
    /// Radius of the initial circle/sphere
    pub initial_radius: f32,
    /// Amplitude of the seeded random offset added to initial positions
    pub jitter: f32,
    /// Seed for the initial jitter
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            charge: -30.0,
            link_distance: 50.0,
            link_strength: 1.0,
            center_strength: 0.1,
            velocity_decay: 0.4,
            alpha_min: 0.001,
            alpha_decay: 1.0 - 0.001_f32.powf(1.0 / 300.0),
            max_iterations: 500,
            initial_radius: 100.0,
            jitter: 1.0,
            seed: 0,
        }
    }
}

/// Node positions produced by a layout, indexed by node id
#[derive(Debug, Clone, PartialEq)]
pub struct Layout<const D: usize> {
    positions: Vec<[f64; D]>,
}

impl<const D: usize> Layout<D> {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of `node`
    pub fn position(&self, node: usize) -> [f64; D] {
        self.positions[node]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64; D]> {
        self.positions.iter()
    }

    /// Center on the origin and scale so the largest absolute coordinate is 1
    fn rescaled(mut positions: Vec<[f64; D]>) -> Self {
        if positions.is_empty() {
            return Self { positions };
        }

        let count = positions.len() as f64;
        let mut mean = [0.0; D];
        for pos in &positions {
            for (axis, value) in pos.iter().enumerate() {
                mean[axis] += value / count;
            }
        }

        let mut limit = 0.0_f64;
        for pos in &mut positions {
            for (axis, value) in pos.iter_mut().enumerate() {
                *value -= mean[axis];
                limit = limit.max(value.abs());
            }
        }

        if limit > 0.0 {
            for value in positions.iter_mut().flatten() {
                *value /= limit;
            }
        }
        Self { positions }
    }
}

/// Compute a 2D spring layout for `network`
pub fn spring_layout_2d(network: &Network, config: &LayoutConfig) -> Layout<2> {
    let total = network.node_count();
    let initial = (0..total)
        .map(|index| {
            // Distribute nodes on a circle initially
            let angle = 2.0 * std::f32::consts::PI * (index as f32) / (total as f32);
            [
                config.initial_radius * angle.cos(),
                config.initial_radius * angle.sin(),
            ]
        })
        .collect();
    run_layout(network, config, initial)
}

/// Compute a 3D spring layout for `network`
pub fn spring_layout_3d(network: &Network, config: &LayoutConfig) -> Layout<3> {
    let total = network.node_count() as f32;
    let golden_ratio = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let initial = (0..network.node_count())
        .map(|index| {
            // Fibonacci sphere
            let i = index as f32;
            let theta = 2.0 * std::f32::consts::PI * i / golden_ratio;
            let phi = (1.0 - 2.0 * (i + 0.5) / total).acos();
            let r = config.initial_radius;
            [
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ]
        })
        .collect();
    run_layout(network, config, initial)
}

fn run_layout<const D: usize>(
    network: &Network,
    config: &LayoutConfig,
    initial: Vec<[f32; D]>,
) -> Layout<D> {
    let mut sim = ForceSimulation::new(network, config.clone(), initial);
    let ticks = sim.run_to_convergence(config.max_iterations);
    tracing::debug!(dimensions = D, ticks, alpha = sim.alpha, "layout finished");

    Layout::rescaled(
        sim.nodes
            .iter()
            .map(|node| node.pos.map(f64::from))
            .collect(),
    )
}

/// A node with position and velocity for simulation
#[derive(Debug, Clone)]
struct SimNode<const D: usize> {
    pos: [f32; D],
    vel: [f32; D],
}

/// An edge for simulation (indices into node array) with its precomputed
/// strength and the share of the correction applied to the target
#[derive(Debug, Clone)]
struct SimEdge {
    source: usize,
    target: usize,
    strength: f32,
    bias: f32,
}

/// CPU force simulation
struct ForceSimulation<const D: usize> {
    nodes: Vec<SimNode<D>>,
    edges: Vec<SimEdge>,
    config: LayoutConfig,
    /// Current alpha (simulation temperature)
    alpha: f32,
}

impl<const D: usize> ForceSimulation<D> {
    fn new(network: &Network, config: LayoutConfig, initial: Vec<[f32; D]>) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let nodes = initial
            .into_iter()
            .map(|mut pos| {
                if config.jitter > 0.0 {
                    for value in &mut pos {
                        *value += rng.random_range(-config.jitter..config.jitter);
                    }
                }
                SimNode { pos, vel: [0.0; D] }
            })
            .collect();

        let edges = network
            .edges()
            .map(|(source, target)| {
                let source_degree = network.degree(source) as f32;
                let target_degree = network.degree(target) as f32;
                SimEdge {
                    source,
                    target,
                    strength: config.link_strength / source_degree.min(target_degree),
                    bias: source_degree / (source_degree + target_degree),
                }
            })
            .collect();

        Self {
            nodes,
            edges,
            config,
            alpha: 1.0,
        }
    }

    /// Check if simulation is still running
    fn is_running(&self) -> bool {
        self.alpha > self.config.alpha_min
    }

    /// Run one simulation tick
    fn tick(&mut self) {
        if !self.is_running() || self.nodes.is_empty() {
            return;
        }

        self.alpha -= self.alpha * self.config.alpha_decay;

        self.apply_many_body_force();
        self.apply_link_force();
        self.apply_center_force();

        let keep = 1.0 - self.config.velocity_decay;
        for node in &mut self.nodes {
            for axis in 0..D {
                node.vel[axis] *= keep;
                node.pos[axis] += node.vel[axis];
            }
        }
    }

    /// Inverse-distance repulsion between all node pairs
    fn apply_many_body_force(&mut self) {
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let delta = difference(&self.nodes[j].pos, &self.nodes[i].pos);
                let dist_sq = delta.iter().map(|d| d * d).sum::<f32>().max(1.0);
                let weight = self.config.charge * self.alpha / dist_sq;

                for (axis, d) in delta.iter().enumerate() {
                    self.nodes[i].vel[axis] += d * weight;
                    self.nodes[j].vel[axis] -= d * weight;
                }
            }
        }
    }

    /// Spring force between connected nodes
    fn apply_link_force(&mut self) {
        for edge in &self.edges {
            let (source, target) = (&self.nodes[edge.source], &self.nodes[edge.target]);

            // Use predicted positions so springs account for pending motion
            let mut delta = [0.0; D];
            for (axis, d) in delta.iter_mut().enumerate() {
                *d = (target.pos[axis] + target.vel[axis]) - (source.pos[axis] + source.vel[axis]);
            }
            let dist = delta.iter().map(|d| d * d).sum::<f32>().sqrt().max(1e-3);

            // Hooke's law: F = k * (x - x0)
            let scale = (dist - self.config.link_distance) / dist * self.alpha * edge.strength;

            for (axis, d) in delta.iter().enumerate() {
                let correction = d * scale;
                self.nodes[edge.target].vel[axis] -= correction * edge.bias;
                self.nodes[edge.source].vel[axis] += correction * (1.0 - edge.bias);
            }
        }
    }

    /// Gravity toward origin
    fn apply_center_force(&mut self) {
        let pull = self.config.center_strength * self.alpha;
        for node in &mut self.nodes {
            for axis in 0..D {
                node.vel[axis] -= node.pos[axis] * pull;
            }
        }
    }

    /// Run simulation to convergence (or max iterations), returning ticks run
    fn run_to_convergence(&mut self, max_iterations: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_iterations && self.is_running() && !self.nodes.is_empty() {
            self.tick();
            ticks += 1;
        }
        ticks
    }
}

fn difference<const D: usize>(a: &[f32; D], b: &[f32; D]) -> [f32; D] {
    std::array::from_fn(|axis| a[axis] - b[axis])
}
