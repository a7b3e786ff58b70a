mod dash_map_ext;
#[cfg(test)]
mod dash_map_ext_test;

pub use self::dash_map_ext::*;
