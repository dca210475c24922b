pub mod word_graph;
