/// Implementation of `osmbin inspect`.
///
/// Prints one line per accepted record, in stream order.
///
/// # Output format
///
/// ```text
/// node 1 lat=50.8 lon=4.35 tags=1 [amenity=bench]
/// way 10 v2 nodes=3 tags=0
/// relation 20 members=1 tags=2 [type=multipolygon, name=Park]
/// ---
/// 3 records
/// ```
use std::fmt::Write as _;

use anyhow::{Context, Result};
use osmbin_stream::OsmStreamSource;
use osmbin_types::OsmGeo;

use crate::InspectArgs;
use crate::input::InputSource;

/// Run the `osmbin inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a record fails to
/// decode.
pub fn run(args: &InspectArgs) -> Result<()> {
    let mut source = InputSource::open(&args.file, args.format, args.chunking.codec())?;
    let filter = args.filter.filter();
    let limit = args.limit.unwrap_or(usize::MAX);

    let mut shown = 0usize;
    while shown < limit
        && source
            .move_next(filter)
            .with_context(|| format!("failed to read {}", args.file.display()))?
    {
        if let Some(geo) = source.current() {
            println!("{}", summary_line(geo));
            shown += 1;
        }
    }

    println!("---");
    println!("{shown} record{}", if shown == 1 { "" } else { "s" });
    Ok(())
}

fn summary_line(geo: &OsmGeo) -> String {
    let common = geo.common();
    let mut line = geo.geo_type().as_str().to_string();

    match common.id {
        Some(id) => {
            let _ = write!(line, " {id}");
        }
        None => line.push_str(" -"),
    }
    if let Some(version) = common.version {
        let _ = write!(line, " v{version}");
    }
    if common.visible == Some(false) {
        line.push_str(" deleted");
    }

    match geo {
        OsmGeo::Node(node) => {
            if let Some(lat) = node.latitude {
                let _ = write!(line, " lat={lat}");
            }
            if let Some(lon) = node.longitude {
                let _ = write!(line, " lon={lon}");
            }
        }
        OsmGeo::Way(way) => {
            let _ = write!(line, " nodes={}", way.nodes.len());
        }
        OsmGeo::Relation(relation) => {
            let _ = write!(line, " members={}", relation.members.len());
        }
    }

    let _ = write!(line, " tags={}", common.tags.len());
    if !common.tags.is_empty() {
        let pairs: Vec<String> = common
            .tags
            .iter()
            .map(|t| format!("{}={}", t.key, t.value))
            .collect();
        let _ = write!(line, " [{}]", pairs.join(", "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmbin_types::{Common, Node, Way};

    #[test]
    fn node_line() {
        let node = OsmGeo::from(Node {
            common: Common {
                id: Some(1),
                tags: [("amenity", "bench")].into_iter().collect(),
                ..Common::default()
            },
            latitude: Some(50.8),
            longitude: Some(4.35),
        });
        assert_eq!(
            summary_line(&node),
            "node 1 lat=50.8 lon=4.35 tags=1 [amenity=bench]"
        );
    }

    #[test]
    fn anonymous_way_line() {
        let way = OsmGeo::from(Way {
            common: Common {
                version: Some(2),
                ..Common::default()
            },
            nodes: vec![1, 2, 3],
        });
        assert_eq!(summary_line(&way), "way - v2 nodes=3 tags=0");
    }
}
