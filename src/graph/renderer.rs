use std::collections::{BTreeMap, HashSet};
use std::io::Write;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::model::GraphModel;
use super::types::DependencyEdge;
use crate::core::RelationKind;
use crate::detector::DependencyCycle;
use crate::error::TangleError;

// Blue-Orange Accessible Palette - Soothing colors with excellent contrast
mod colors {
    pub const NORMAL_NODE_FILL: &str = "#E3F2FD"; // Light blue
    pub const NORMAL_NODE_STROKE: &str = "#1976D2"; // Medium blue
    pub const CYCLE_NODE_FILL: &str = "#FFF3E0"; // Light orange
    pub const CYCLE_NODE_STROKE: &str = "#F57C00"; // Vibrant orange
    pub const SIMPLE_EDGE: &str = "#64B5F6"; // Soft blue
    pub const AUGMENTED_EDGE: &str = "#90A4AE"; // Blue-grey
    pub const UNPACK_EDGE: &str = "#81C784"; // Soft green
    pub const CYCLE_EDGE: &str = "#FF6500"; // Deep orange
    pub const LEGEND_BG: &str = "#FAFAFA"; // Off-white background
}

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(TangleError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(TangleError::from)
    };
}

/// Occurrences of one collapsed (dependent, dependency) pair
type EdgeGroups<'g> = BTreeMap<(NodeIndex, NodeIndex), Vec<&'g DependencyEdge>>;

pub struct GraphRenderer {
    highlight_cycles: bool,
    show_locations: bool,
}

impl GraphRenderer {
    pub fn new(highlight_cycles: bool, show_locations: bool) -> Self {
        Self {
            highlight_cycles,
            show_locations,
        }
    }

    pub fn render_mermaid(
        &self,
        model: &GraphModel,
        cycles: &[DependencyCycle],
        output: &mut dyn Write,
    ) -> Result<(), TangleError> {
        writeln_out!(output, "graph TD")?;

        let cyclic = cycle_members(cycles);

        for idx in sorted_nodes(model) {
            let name = model.name_of(idx);
            let node_id = self.mermaid_id(name);
            let in_cycle = self.highlight_cycles && cyclic.contains(name);

            if in_cycle {
                writeln_out!(output, "    {}((\"{}\"))", node_id, name)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:3px",
                    node_id,
                    colors::CYCLE_NODE_FILL,
                    colors::CYCLE_NODE_STROKE
                )?;
            } else {
                writeln_out!(output, "    {}[\"{}\"]", node_id, name)?;
                writeln_out!(
                    output,
                    "    style {} fill:{},stroke:{},stroke-width:2px",
                    node_id,
                    colors::NORMAL_NODE_FILL,
                    colors::NORMAL_NODE_STROKE
                )?;
            }
        }

        writeln_out!(output)?;

        for (link_style_index, ((source, target), edges)) in
            group_edges(model).into_iter().enumerate()
        {
            let source_name = model.name_of(source);
            let target_name = model.name_of(target);
            let label = self.edge_label(&edges);

            writeln_out!(
                output,
                "    {} -->|{}| {}",
                self.mermaid_id(source_name),
                label,
                self.mermaid_id(target_name)
            )?;

            if self.highlight_cycles && is_edge_in_cycle(source_name, target_name, cycles) {
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:3px",
                    link_style_index,
                    colors::CYCLE_EDGE
                )?;
            } else {
                writeln_out!(
                    output,
                    "    linkStyle {} stroke:{},stroke-width:2px",
                    link_style_index,
                    edge_color(&edges)
                )?;
            }
        }

        if !cycles.is_empty() && self.highlight_cycles {
            writeln_out!(output)?;
            writeln_out!(output, "    subgraph Legend")?;
            writeln_out!(output, "        L1[Variable]")?;
            writeln_out!(output, "        L2((Variable in Cycle))")?;
            writeln_out!(
                output,
                "        style L1 fill:{},stroke:{},stroke-width:2px",
                colors::NORMAL_NODE_FILL,
                colors::NORMAL_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style L2 fill:{},stroke:{},stroke-width:3px",
                colors::CYCLE_NODE_FILL,
                colors::CYCLE_NODE_STROKE
            )?;
            writeln_out!(
                output,
                "        style Legend fill:{},stroke:#ddd,stroke-width:1px",
                colors::LEGEND_BG
            )?;
            writeln_out!(output, "    end")?;
        }

        Ok(())
    }

    pub fn render_dot(
        &self,
        model: &GraphModel,
        cycles: &[DependencyCycle],
        output: &mut dyn Write,
    ) -> Result<(), TangleError> {
        writeln_out!(output, "digraph variable_dependencies {{")?;
        writeln_out!(output, "    rankdir=LR;")?;
        writeln_out!(output, "    node [shape=box, style=rounded];")?;
        writeln_out!(output)?;

        let cyclic = cycle_members(cycles);

        for idx in sorted_nodes(model) {
            let name = model.name_of(idx);
            let (fill_color, stroke_color) = if self.highlight_cycles && cyclic.contains(name) {
                (colors::CYCLE_NODE_FILL, colors::CYCLE_NODE_STROKE)
            } else {
                (colors::NORMAL_NODE_FILL, colors::NORMAL_NODE_STROKE)
            };

            writeln_out!(
                output,
                r#"    "{}" [style=filled, fillcolor="{}", color="{}", penwidth=2];"#,
                escape_dot(name),
                fill_color,
                stroke_color
            )?;
        }

        writeln_out!(output)?;

        for ((source, target), edges) in group_edges(model) {
            let source_name = model.name_of(source);
            let target_name = model.name_of(target);
            let label = self.edge_label(&edges);

            let (color, penwidth) =
                if self.highlight_cycles && is_edge_in_cycle(source_name, target_name, cycles) {
                    (colors::CYCLE_EDGE, 3)
                } else {
                    (edge_color(&edges), 2)
                };

            writeln_out!(
                output,
                r#"    "{}" -> "{}" [label="{}", color="{}", penwidth={}];"#,
                escape_dot(source_name),
                escape_dot(target_name),
                escape_dot(&label),
                color,
                penwidth
            )?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    fn edge_label(&self, edges: &[&DependencyEdge]) -> String {
        if self.show_locations {
            let lines: Vec<String> = edges.iter().map(|e| e.location.to_string()).collect();
            lines.join(", ")
        } else if edges.len() > 1 {
            format!("{} uses", edges.len())
        } else {
            edges
                .first()
                .map(|edge| edge.kind.to_string())
                .unwrap_or_default()
        }
    }

    fn mermaid_id(&self, name: &str) -> String {
        // Replace non-alphanumeric characters with underscores for valid Mermaid IDs
        name.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect()
    }
}

fn sorted_nodes(model: &GraphModel) -> Vec<NodeIndex> {
    let mut nodes: Vec<NodeIndex> = model.graph().node_indices().collect();
    nodes.sort_by(|a, b| model.name_of(*a).cmp(model.name_of(*b)));
    nodes
}

fn group_edges(model: &GraphModel) -> EdgeGroups<'_> {
    let mut groups: EdgeGroups<'_> = BTreeMap::new();
    for edge in model.graph().edge_references() {
        groups
            .entry((edge.source(), edge.target()))
            .or_default()
            .push(edge.weight());
    }
    groups
}

fn cycle_members(cycles: &[DependencyCycle]) -> HashSet<&str> {
    cycles
        .iter()
        .flat_map(|cycle| cycle.variables().iter().map(String::as_str))
        .collect()
}

fn is_edge_in_cycle(from: &str, to: &str, cycles: &[DependencyCycle]) -> bool {
    cycles
        .iter()
        .any(|cycle| cycle.contains(from) && cycle.contains(to))
}

fn edge_color(edges: &[&DependencyEdge]) -> &'static str {
    match edges.first().map(|edge| edge.kind) {
        Some(RelationKind::Augmented) => colors::AUGMENTED_EDGE,
        Some(RelationKind::Unpack) => colors::UNPACK_EDGE,
        _ => colors::SIMPLE_EDGE,
    }
}

fn escape_dot(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
