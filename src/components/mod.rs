pub mod flowchart;
