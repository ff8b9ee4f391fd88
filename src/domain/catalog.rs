use crate::domain::model::{AssetSpec, StyleCategory};

const fn spec(prompt: &'static str, filename: &'static str, style: StyleCategory) -> AssetSpec {
    AssetSpec {
        prompt,
        filename,
        style,
    }
}

pub const MOLECULAR_STRUCTURES: [AssetSpec; 5] = [
    spec(
        "3D molecular structure of a water molecule (H2O) showing electron clouds and bonds, transparent spheres for atoms, scientific illustration",
        "water_molecule_3d.png",
        StyleCategory::MolecularStructure,
    ),
    spec(
        "DNA double helix structure with labeled base pairs, scientific diagram style, clean educational illustration",
        "dna_double_helix.png",
        StyleCategory::MolecularStructure,
    ),
    spec(
        "ATP molecule (adenosine triphosphate) with phosphate groups highlighted, energy transfer visualization",
        "atp_molecule_energy.png",
        StyleCategory::MolecularStructure,
    ),
    spec(
        "Protein structure showing primary, secondary, tertiary, and quaternary levels, educational diagram",
        "protein_structure_levels.png",
        StyleCategory::MolecularStructure,
    ),
    spec(
        "Chemical reaction diagram showing reactants and products with energy levels, activation energy graph",
        "chemical_reaction_energy.png",
        StyleCategory::MolecularStructure,
    ),
];

pub const NETWORK_DIAGRAMS: [AssetSpec; 5] = [
    spec(
        "Systems thinking diagram showing interconnected nodes and feedback loops, clean technical infographic style",
        "systems_thinking_network.png",
        StyleCategory::NetworkDiagram,
    ),
    spec(
        "Biological pathway network with nodes and connections, gene regulatory network visualization",
        "biological_pathway_network.png",
        StyleCategory::NetworkDiagram,
    ),
    spec(
        "Ecosystem food web diagram showing energy flow between organisms, circular network layout",
        "ecosystem_food_web.png",
        StyleCategory::NetworkDiagram,
    ),
    spec(
        "Neural network diagram with input, hidden, and output layers, AI/ML visualization style",
        "neural_network_layers.png",
        StyleCategory::NetworkDiagram,
    ),
    spec(
        "Boolean logic network showing AND, OR, NOT gates connected in a circuit, computational modeling",
        "boolean_logic_network.png",
        StyleCategory::NetworkDiagram,
    ),
];

pub const CELL_IMAGERY: [AssetSpec; 5] = [
    spec(
        "Detailed animal cell cross-section showing all organelles (nucleus, mitochondria, ER, Golgi), labeled educational illustration",
        "animal_cell_detailed.png",
        StyleCategory::CellImagery,
    ),
    spec(
        "Plant cell showing chloroplasts, cell wall, and large central vacuole, vibrant green and blue tones",
        "plant_cell_detailed.png",
        StyleCategory::CellImagery,
    ),
    spec(
        "Mitochondria organelle showing inner and outer membranes with cristae, energy production visualization",
        "mitochondria_powerhouse.png",
        StyleCategory::CellImagery,
    ),
    spec(
        "Cell membrane structure showing phospholipid bilayer with embedded proteins, molecular detail",
        "cell_membrane_structure.png",
        StyleCategory::CellImagery,
    ),
    spec(
        "Cell division (mitosis) showing all phases: prophase, metaphase, anaphase, telophase, educational sequence",
        "cell_division_mitosis.png",
        StyleCategory::CellImagery,
    ),
];

pub const EDUCATIONAL_GRAPHICS: [AssetSpec; 5] = [
    spec(
        "NGSS science standards icon with gear and beaker symbol, flat design, professional badge style",
        "ngss_standards_icon.png",
        StyleCategory::EducationalGraphic,
    ),
    spec(
        "Scientific method flowchart with steps: question, hypothesis, experiment, analysis, conclusion, circular diagram",
        "scientific_method_flowchart.png",
        StyleCategory::EducationalGraphic,
    ),
    spec(
        "Data visualization showing multiple types: bar chart, line graph, pie chart, scatter plot, colorful infographic",
        "data_visualization_types.png",
        StyleCategory::EducationalGraphic,
    ),
    spec(
        "Lab safety equipment illustrations: goggles, gloves, lab coat, fire extinguisher, first aid kit, icon set",
        "lab_safety_equipment.png",
        StyleCategory::EducationalGraphic,
    ),
    spec(
        "States of matter transformation diagram: solid to liquid to gas, particle model visualization",
        "states_of_matter_diagram.png",
        StyleCategory::EducationalGraphic,
    ),
];

/// Category name and its specs, in generation order.
pub const VISUAL_ASSETS: [(&str, &[AssetSpec]); 4] = [
    ("molecular_structures", &MOLECULAR_STRUCTURES),
    ("network_diagrams", &NETWORK_DIAGRAMS),
    ("cell_imagery", &CELL_IMAGERY),
    ("educational_graphics", &EDUCATIONAL_GRAPHICS),
];

pub fn category(name: &str) -> Option<&'static [AssetSpec]> {
    VISUAL_ASSETS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, specs)| *specs)
}

pub fn category_names() -> Vec<&'static str> {
    VISUAL_ASSETS.iter().map(|(name, _)| *name).collect()
}

/// "molecular_structures" -> "Molecular Structures"
pub fn display_name(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn total_visual_assets() -> usize {
    VISUAL_ASSETS.iter().map(|(_, specs)| specs.len()).sum()
}
