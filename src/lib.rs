//! Student grouping framework for the U-Engine ecosystem.
//!
//! Partitions a roster into near-equal groups that maximize a
//! social-compatibility score (personality-type affinity plus stated
//! favorites and non-favorites), using a generational genetic algorithm.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `CompatibilityMatrix`,
//!   `GroupAssignment`
//! - **`ga`**: Partition encoding, fitness, operators, and the GA runner
//! - **`validation`**: Input integrity checks (duplicate IDs, type range,
//!   dangling preference references)
//! - **`optimizer`**: `optimize_partition` / `optimize` entry points
//!
//! # Example
//!
//! ```
//! use u_grouping::ga::GaConfig;
//! use u_grouping::models::Student;
//! use u_grouping::optimize_partition;
//!
//! let students = vec![
//!     Student::new("s1").with_personality_type(2).with_favorite("s2"),
//!     Student::new("s2").with_personality_type(7),
//!     Student::new("s3").with_personality_type(5),
//!     Student::new("s4"),
//! ];
//! let config = GaConfig::default().with_seed(42);
//! let partition = optimize_partition(&students, 2, &config).unwrap();
//! assert_eq!(partition.group_sizes(), vec![2, 2]);
//! ```
//!
//! # References
//!
//! - Falkenauer (1998), "Genetic Algorithms and Grouping Problems"
//! - Riso & Hudson (1999), "The Wisdom of the Enneagram"

pub mod error;
pub mod ga;
pub mod models;
pub mod optimizer;
pub mod validation;

pub use error::{GroupingError, Result};
pub use optimizer::{GroupingOutcome, GroupingRequest, optimize, optimize_partition};
