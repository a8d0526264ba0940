//! Places, deduplicated across the file.
//!
//! GEDCOM repeats a place in full at every event that happened there. A
//! place is reused when its name, every address part and its coordinates
//! are identical.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use lineage_core::{
  GraphSink,
  ids::PlaceId,
  model::{Place, PlacePart},
};
use lineage_gedcom::Record;
use tracing::debug;

use super::{Importer, sources::media_title};
use crate::error::{Error, Result};

/// Lines of an address, in postal order.
const ADDRESS_LINES: &[&str] = &["ADR1", "ADR2", "POST", "CITY", "STAE", "CTRY"];

#[derive(Debug, Default)]
pub(super) struct PlaceCache {
  by_key:       HashMap<String, PlaceId>,
  /// Titles of the media already attached to each place.
  media_titles: HashMap<PlaceId, HashSet<String>>,
}

/// An ADDR record as text, one line per part. Gramps writes "Not Provided"
/// for blank parts; those are dropped.
pub(crate) fn address_text(addr: &Record) -> String {
  let lines = std::iter::once(addr.value.as_str())
    .chain(ADDRESS_LINES.iter().filter_map(|tag| addr.text(tag)))
    .flat_map(str::lines)
    .map(|line| line.replace("Not Provided", "").trim().to_string())
    .filter(|line| !line.is_empty());
  lines.collect::<Vec<_>>().join("\n")
}

/// Lookup key of a place. Address parts are sorted so their order in the
/// file does not matter.
fn place_key(name: &str, addr: Option<&Record>, map: Option<&Record>) -> String {
  let mut parts: Vec<(&str, &str)> = addr
    .map(|a| {
      a.children
        .iter()
        .map(|c| (c.tag.as_str(), c.value.as_str()))
        .collect()
    })
    .unwrap_or_default();
  parts.sort();

  let mut key = name.to_string();
  for (tag, value) in parts {
    key.push_str(&format!(" {tag}={value}"));
  }
  if let Some(map) = map {
    key.push_str(&format!(" MAP={}", coordinates(map, ",")));
  }
  key
}

fn coordinates(map: &Record, separator: &str) -> String {
  format!(
    "{}{separator}{}",
    map.text("LATI").unwrap_or_default(),
    map.text("LONG").unwrap_or_default()
  )
}

impl<S: GraphSink> Importer<'_, S> {
  /// The place of an event, characteristic or repository: its PLAC, or its
  /// ADDR when there is no PLAC.
  pub(super) fn place_of(&mut self, data: &Record) -> Result<Option<PlaceId>> {
    let addr = data.first("ADDR");
    match (data.first("PLAC"), addr) {
      (None, None) => Ok(None),
      (None, Some(addr)) => self.place(addr, Some(addr)).map(Some),
      (Some(plac), addr) => self.place(plac, addr).map(Some),
    }
  }

  fn place(&mut self, node: &Record, addr: Option<&Record>) -> Result<PlaceId> {
    let is_plac = node.tag == "PLAC";
    let map = if is_plac { node.first("MAP") } else { None };
    if is_plac {
      self.check_fields(node, "PLAC", &["MAP"]);
    }

    let name = if node.value.is_empty() {
      address_text(node).replace('\n', ", ")
    } else {
      node.value.clone()
    };
    let key = place_key(&name, addr, map);
    if let Some(&id) = self.places.by_key.get(&key) {
      return Ok(id);
    }

    let id = self
      .sink
      .create_place(Place {
        name,
        parent_place: None,
      })
      .map_err(Error::sink)?;
    debug!(%id, key, "new place");
    self.places.by_key.insert(key, id);

    if let Some(map) = map
      && let Some(part_type) = self.types.place("MAP")
    {
      self.batch.place_parts.push(PlacePart {
        place: id,
        part_type,
        value: coordinates(map, " "),
      });
    }
    if let Some(addr) = addr {
      for part in &addr.children {
        if part.value.is_empty() {
          continue;
        }
        match self.types.place_or_extension(&mut *self.sink, &part.tag)? {
          Some(part_type) => self.batch.place_parts.push(PlacePart {
            place: id,
            part_type,
            value: part.value.clone(),
          }),
          None => self.report(part, format!("Unknown place part {}", part.tag)),
        }
      }
    }
    Ok(id)
  }

  /// Media attached to an event or characteristic belong to its place:
  /// gather the ones not yet seen for that place into a "Media for" source
  /// about it. Without a PLAC every OBJE is reported.
  pub(super) fn media_for_place(
    &mut self,
    data: &Record,
    place: Option<PlaceId>,
    last_change: DateTime<Utc>,
  ) -> Result<()> {
    let (Some(plac), Some(place)) = (data.first("PLAC"), place) else {
      for obje in data.all("OBJE") {
        self.report(obje, "Unhandled OBJE without a place");
      }
      return Ok(());
    };

    let file = self.file;
    let known = self.places.media_titles.entry(place).or_default();
    let fresh: Vec<&Record> = data
      .all("OBJE")
      .filter(|obje| known.insert(media_title(file, obje).to_string()))
      .collect();
    if fresh.is_empty() {
      return Ok(());
    }
    self.create_media_source(
      format!("Media for {}", plac.value),
      fresh,
      Some(place),
      last_change,
    )?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(input: &str) -> lineage_gedcom::GedcomFile {
    lineage_gedcom::parse_str(input, "t.ged").unwrap()
  }

  #[test]
  fn address_text_drops_placeholders() {
    let file = parse(
      "0 HEAD\n0 @U1@ SUBM\n1 ADDR 1 Main St\n2 CITY Springfield\n2 STAE Not Provided\n2 CTRY USA\n",
    );
    let addr = file.resolve("@U1@").unwrap().first("ADDR").unwrap();
    assert_eq!(address_text(addr), "1 Main St\nSpringfield\nUSA");
  }

  #[test]
  fn place_key_ignores_part_order() {
    let file = parse(
      "0 HEAD\n0 @A@ REPO\n1 ADDR x\n2 CITY Paris\n2 CTRY France\n0 @B@ REPO\n1 ADDR x\n2 CTRY France\n2 CITY Paris\n",
    );
    let a = file.resolve("@A@").unwrap().first("ADDR");
    let b = file.resolve("@B@").unwrap().first("ADDR");
    assert_eq!(place_key("Paris", a, None), place_key("Paris", b, None));
    assert_ne!(place_key("Paris", a, None), place_key("Paris", None, None));
  }
}
