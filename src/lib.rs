pub mod traits;
pub mod library;
pub mod reader;
pub mod writer;
pub mod virtual_library;
pub mod domain;
pub mod state;
pub mod cache;
pub mod virtual_list;

// Export traits
pub use traits::{Entity, Group, GroupId};

// Export the windowing engine
pub use virtual_list::{ScrollBehavior, ScrollRequest, VirtualList, VisibleItem};
pub use domain::flatten::{ItemKey, ItemKind, ViewMode, VirtualItem};
pub use domain::positions::GroupPositionMap;
pub use state::{
    EmptyGroupPolicy, ItemHeights, ListConfig,
    SurfaceEvent, SurfaceEvents, Subscription, ViewportState, ViewportTracker
};

// Export library data source
pub use library::{Album, Artist, Library, Track};
pub use reader::{parse_library, read_library, LibraryData, LibraryFooter, LibraryHeader};
pub use writer::LibraryWriter;
pub use virtual_library::VirtualLibrary;
