//! Events and characteristics, and the assertions tying them to personas.

use lineage_core::{
  GraphSink,
  assertion::{EventRole, P2C, P2E},
  ids::{CharacteristicId, CharacteristicPartTypeId, EventId, PersonaId},
  model::{Characteristic, CharacteristicPart, Event},
  vocab::title_case,
};
use lineage_date::DateRange;
use lineage_gedcom::Record;

use super::Importer;
use crate::error::{Error, Result};

const EVENT_FIELDS: &[&str] =
  &["DATE", "ADDR", "PLAC", "SOUR", "TYPE", "OBJE", "NOTE"];

/// Event type tag for an `EVEN` with the given TYPE, and the label to name
/// the event with when the type is not one we map.
fn generic_event(kind: Option<&str>) -> (&'static str, Option<&str>) {
  match kind {
    Some("Marriage") => ("MARR", None),
    Some("Engagement") => ("ENGA", None),
    Some("Residence") => ("RESI", None),
    // Closest type we have.
    Some("Separation") => ("DIV", None),
    Some("Military") => ("_MIL", None),
    Some("Unknown") | None => ("EVEN", None),
    Some(other) => ("EVEN", Some(other)),
  }
}

/// Name to display for a persona: "John /Smith/" becomes "John Smith".
pub(super) fn display_name(name: &str) -> String {
  name.replace('/', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split `Given Names /Surname/ Suffix`.
fn split_name(name: &str) -> (&str, &str, &str) {
  match name.split_once('/') {
    None => (name.trim(), "", ""),
    Some((given, rest)) => {
      let (surname, suffix) = rest.split_once('/').unwrap_or((rest, ""));
      (given.trim(), surname.trim(), suffix.trim())
    }
  }
}

impl<S: GraphSink> Importer<'_, S> {
  /// Create the event `data` describes, of type `tag`, and assert that
  /// each participant took part in it.
  ///
  /// A birth is created once per principal: a second BIRT for the same
  /// persona only adds assertions to the first one. `owner` is the INDI or
  /// FAM record the change date is taken from.
  pub(super) fn create_event(
    &mut self,
    participants: &[(PersonaId, EventRole)],
    tag: &str,
    data: &Record,
    owner: &Record,
  ) -> Result<EventId> {
    let (tag, label) = match tag {
      "EVEN" => generic_event(data.text("TYPE")),
      _ => (tag, None),
    };
    let event_type = self.types.event_or_create(&mut *self.sink, tag)?;

    let principals: Vec<PersonaId> = participants
      .iter()
      .filter(|(_, role)| *role == EventRole::Principal)
      .map(|&(persona, _)| persona)
      .collect();
    if principals.is_empty() {
      self.report(data, format!("No principal given for event {tag}"));
    }
    let names = principals
      .iter()
      .map(|&p| self.personas.name(p))
      .collect::<Vec<_>>()
      .join(" and ");
    let name = match tag {
      "BIRT" => format!("Birth of {names}"),
      "MARR" => format!("Marriage of {names}"),
      "DEAT" => format!("Death of {names}"),
      _ => format!("{} of {names}", label.unwrap_or(event_type.name.as_str())),
    };

    let last_change = self.last_change(owner);
    let existing = match (tag, principals.first()) {
      ("BIRT", Some(principal)) => self.births.get(principal).copied(),
      _ => None,
    };
    let (event, cited) = match existing {
      Some(event) => (event, vec![self.sources.no_source()]),
      None => {
        let place = self.place_of(data)?;
        self.media_for_place(data, place, last_change)?;
        let event = self
          .sink
          .create_event(Event {
            event_type: event_type.id,
            name,
            place,
            date: data.text("DATE").map(DateRange::parse),
          })
          .map_err(Error::sink)?;
        if tag == "BIRT"
          && let Some(&principal) = principals.first()
        {
          self.births.insert(principal, event);
        }
        (event, self.cite(Some(data))?)
      }
    };

    // A note on the event is about the event itself, so it explains the
    // principal's part rather than any source.
    let note = self.notes(data);
    for &(person, role) in participants {
      let rationale = match role {
        EventRole::Principal => note.as_str(),
        _ => "",
      };
      for cite in &cited {
        let persona = self.persona_for(cite, person, last_change)?;
        let claim = self.claim(cite.source, rationale.to_string(), last_change);
        self.batch.p2e.push(P2E {
          claim,
          persona,
          event,
          role,
        });
      }
    }

    self.check_fields(data, "EVENT", EVENT_FIELDS);
    Ok(event)
  }

  /// Create the characteristic `record` describes (a NAME, SEX, OCCU, ...
  /// or an extension tag) for `persona`.
  ///
  /// The record's value is the characteristic's main part, except for a
  /// NAME, whose value is split into given name, surname and suffix unless
  /// GIVN or SURN sub-records already give them.
  pub(super) fn create_characteristic(
    &mut self,
    tag: &str,
    record: &Record,
    persona: PersonaId,
    owner: &Record,
  ) -> Result<CharacteristicId> {
    let part_type = match tag {
      "NAME" => None,
      _ => Some(self.types.part_or_create(&mut *self.sink, tag)?),
    };
    let name = part_type
      .as_ref()
      .map_or_else(|| title_case(tag), |t| t.name.clone());

    let last_change = self.last_change(owner);
    let (place, date) = if record.has_children() {
      let place = self.place_of(record)?;
      self.media_for_place(record, place, last_change)?;
      (place, record.text("DATE").map(DateRange::parse))
    } else {
      (None, None)
    };
    let characteristic = self
      .sink
      .create_characteristic(Characteristic { name, place, date })
      .map_err(Error::sink)?;

    for cite in self.cite(Some(record))? {
      let persona = self.persona_for(&cite, persona, last_change)?;
      let claim = self.claim(cite.source, String::new(), last_change);
      self.batch.p2c.push(P2C {
        claim,
        persona,
        characteristic,
      });
    }

    if let Some(part_type) = &part_type {
      self.add_part(characteristic, part_type.id, &record.value);
    }
    if tag == "NAME"
      && record.first("GIVN").is_none()
      && record.first("SURN").is_none()
    {
      let (given, surname, suffix) = split_name(&record.value);
      self.add_given_names(characteristic, given);
      self.add_tagged_part(characteristic, "SURN", surname);
      self.add_tagged_part(characteristic, "NSFX", suffix);
    }

    for (sub, records) in record.for_all_fields() {
      match sub {
        "SOUR" | "ADDR" | "PLAC" | "OBJE" | "DATE" => {}
        "TYPE" if tag == "NAME" => {}
        "NOTE" => {
          let note = self.notes(record);
          self.add_tagged_part(characteristic, "NOTE", &note);
        }
        "GIVN" => {
          for r in records {
            self.add_given_names(characteristic, &r.value);
          }
        }
        _ => match self.types.part(sub).map(|t| t.id) {
          Some(part_type) => {
            for r in records {
              self.add_part(characteristic, part_type, &r.value);
            }
          }
          None => self.report(records[0], format!("Unhandled {tag}.{sub}")),
        },
      }
    }
    Ok(characteristic)
  }

  fn add_part(
    &mut self,
    characteristic: CharacteristicId,
    part_type: CharacteristicPartTypeId,
    value: &str,
  ) {
    if value.is_empty() {
      return;
    }
    self.batch.characteristic_parts.push(CharacteristicPart {
      characteristic,
      part_type,
      value: value.to_string(),
    });
  }

  /// Add a part whose type is one of the built-in vocabulary.
  fn add_tagged_part(&mut self, characteristic: CharacteristicId, tag: &str, value: &str) {
    if let Some(part_type) = self.types.part(tag).map(|t| t.id) {
      self.add_part(characteristic, part_type, value);
    }
  }

  /// GIVN, split into one given name and middle names when enabled.
  fn add_given_names(&mut self, characteristic: CharacteristicId, value: &str) {
    if !self.options.given_name_to_middle_name {
      self.add_tagged_part(characteristic, "GIVN", value.trim());
      return;
    }
    let mut words = value.split([',', ' ']).filter(|w| !w.is_empty());
    if let Some(first) = words.next() {
      self.add_tagged_part(characteristic, "GIVN", first);
    }
    for middle in words {
      self.add_tagged_part(characteristic, "_MIDL", middle);
    }
  }
}
