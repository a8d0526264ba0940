//! GEDCOM line tokenizer.
//!
//! Pipeline:
//!   raw &str
//!     └─ parse_line()   → Line { level, xref, tag, value }
//!          └─ fold CONT/CONC into the previous record's value
//!               └─ attach to the parent one level up → GedcomFile

use std::{collections::HashMap, path::Path, sync::Arc};

use tracing::debug;

use crate::{
  error::{Error, Result},
  record::{GedcomFile, Location, Record, is_pointer},
};

struct Line<'a> {
  level: usize,
  xref:  Option<&'a str>,
  tag:   &'a str,
  value: &'a str,
}

fn parse_line<'a>(file: &str, number: usize, raw: &'a str) -> Result<Line<'a>> {
  let invalid = |reason: String| Error::InvalidFormat {
    file: file.to_string(),
    line: number,
    reason,
  };

  let raw = raw.trim_start();
  let (level, rest) = raw.split_once(' ').unwrap_or((raw, ""));
  let level = level
    .parse::<usize>()
    .map_err(|_| invalid(format!("level is not a number: {level:?}")))?;

  let rest = rest.trim_start();
  let (xref, rest) = match rest.split_once(' ') {
    Some((first, after)) if is_pointer(first) => (Some(first), after),
    _ => (None, rest),
  };

  let rest = rest.trim_start();
  let (tag, value) = rest.split_once(' ').unwrap_or((rest, ""));
  if tag.is_empty() {
    return Err(invalid("line has no tag".into()));
  }

  Ok(Line {
    level,
    xref,
    tag,
    value,
  })
}

/// Close the deepest open record and attach it to its parent.
fn close(stack: &mut Vec<Record>, top: &mut Vec<Record>) {
  if let Some(done) = stack.pop() {
    match stack.last_mut() {
      Some(parent) => parent.children.push(done),
      None => top.push(done),
    }
  }
}

/// Parse the content of a GEDCOM file. `file_name` is used in locations and
/// error messages.
pub fn parse_str(input: &str, file_name: &str) -> Result<GedcomFile> {
  let file: Arc<str> = Arc::from(file_name);
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut top: Vec<Record> = Vec::new();
  // Records still open, outermost first; the record at index i has level i.
  let mut stack: Vec<Record> = Vec::new();

  for (i, raw) in input.lines().enumerate() {
    let number = i + 1;
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    if raw.trim().is_empty() {
      continue;
    }
    let line = parse_line(file_name, number, raw)?;

    if line.level > stack.len() {
      return Err(Error::InvalidFormat {
        file:   file_name.to_string(),
        line:   number,
        reason: format!(
          "level {} follows level {}",
          line.level,
          stack.len().saturating_sub(1)
        ),
      });
    }

    if matches!(line.tag, "CONT" | "CONC")
      && line.level > 0
      && line.level == stack.len()
      && let Some(parent) = stack.last_mut()
    {
      if line.tag == "CONT" {
        parent.value.push('\n');
      }
      parent.value.push_str(line.value);
      continue;
    }

    while stack.len() > line.level {
      close(&mut stack, &mut top);
    }

    if line.level == 0 && top.is_empty() && line.tag != "HEAD" {
      return Err(Error::InvalidFormat {
        file:   file_name.to_string(),
        line:   number,
        reason: format!("file starts with {} instead of HEAD", line.tag),
      });
    }

    stack.push(Record {
      tag:      line.tag.to_string(),
      xref:     line.xref.map(str::to_string),
      value:    line.value.to_string(),
      location: Location {
        file: file.clone(),
        line: number,
      },
      children: Vec::new(),
    });
  }

  while !stack.is_empty() {
    close(&mut stack, &mut top);
  }

  if top.is_empty() {
    return Err(Error::InvalidFormat {
      file:   file_name.to_string(),
      line:   0,
      reason: "file is empty".into(),
    });
  }

  let mut index = HashMap::new();
  for (i, r) in top.iter().enumerate() {
    if let Some(xref) = &r.xref
      && index.insert(xref.clone(), i).is_some()
    {
      return Err(Error::InvalidFormat {
        file:   file_name.to_string(),
        line:   r.location.line,
        reason: format!("{xref} is defined more than once"),
      });
    }
  }

  debug!(
    file = file_name,
    records = top.len(),
    "parsed GEDCOM record tree"
  );
  Ok(GedcomFile::new(file_name.to_string(), top, index))
}

/// Read and parse a GEDCOM file. Bytes that are not UTF-8 are replaced.
pub fn parse_file(path: &Path) -> Result<GedcomFile> {
  let bytes = std::fs::read(path).map_err(|source| Error::Io {
    path: path.display().to_string(),
    source,
  })?;
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string());
  parse_str(&String::from_utf8_lossy(&bytes), &name)
}
