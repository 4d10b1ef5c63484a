//! Line-oriented state machine for ASF text
//!
//! Each meaningful line either switches the active section (`:name ...`) or is
//! a body line of the active section. Body lines are dispatched on the
//! section; `:bonedata` additionally tracks an open `begin`/`end` record and
//! `:hierarchy` tracks its `begin`/`end` markers.

use std::str::FromStr;

use acclaim_data::text::{content_lines, parse_float, parse_floats, parse_int, parse_limit};
use acclaim_data::{AxisOrder, DVec3, ParseError, ParseErrorKind};
use log::{debug, trace, warn};

use crate::error::Result;
use crate::types::{BoneAxis, BoneDefinition, Limit, Skeleton};

/// Parse ASF text into a [`Skeleton`]
///
/// Blank lines and `#` comments are skipped. Unknown sections and unknown
/// bone fields are ignored; a bone record without a `name` is dropped.
pub fn parse_skeleton(text: &str) -> Result<Skeleton> {
    let mut parser = SkeletonParser::default();
    for (line_number, line) in content_lines(text) {
        parser.feed(line_number, line)?;
    }
    parser.finish()
}

impl FromStr for Skeleton {
    type Err = crate::error::AsfError;

    fn from_str(s: &str) -> Result<Self> {
        parse_skeleton(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    /// Lines before the first section header
    #[default]
    Preamble,
    Version,
    Name,
    Units,
    Documentation,
    Root,
    BoneData,
    Hierarchy,
    Unknown,
}

impl Section {
    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "version" => Self::Version,
            "name" => Self::Name,
            "units" => Self::Units,
            "documentation" => Self::Documentation,
            "root" => Self::Root,
            "bonedata" => Self::BoneData,
            "hierarchy" => Self::Hierarchy,
            _ => Self::Unknown,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Preamble => "preamble",
            Self::Version => "version",
            Self::Name => "name",
            Self::Units => "units",
            Self::Documentation => "documentation",
            Self::Root => "root",
            Self::BoneData => "bonedata",
            Self::Hierarchy => "hierarchy",
            Self::Unknown => "unknown",
        }
    }
}

/// Fields collected between a `begin` and its `end`
#[derive(Debug, Default)]
struct BoneRecord {
    begin_line: usize,
    id: Option<i64>,
    name: Option<String>,
    direction: DVec3,
    length: f64,
    axis: Option<BoneAxis>,
    dof: Vec<String>,
    limits: Vec<Limit>,
}

impl BoneRecord {
    fn opened_at(line: usize) -> Self {
        Self {
            begin_line: line,
            ..Self::default()
        }
    }

    fn into_definition(self) -> Option<BoneDefinition> {
        let name = self.name?;
        Some(BoneDefinition {
            id: self.id,
            name,
            direction: self.direction,
            length: self.length,
            axis: self.axis,
            dof: self.dof,
            limits: self.limits,
        })
    }

    fn apply_field(&mut self, line_number: usize, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&key, values)) = tokens.split_first() else {
            return Ok(());
        };

        if key.starts_with('(') {
            self.limits.extend(scan_limits(line, line_number)?);
            return Ok(());
        }

        match key.to_ascii_lowercase().as_str() {
            "id" => {
                let token = values.first().ok_or_else(|| missing("id", 1, 0, line_number))?;
                self.id = Some(parse_int(token, "id", line_number)?);
            }
            "name" => {
                let token = values
                    .first()
                    .ok_or_else(|| missing("name", 1, 0, line_number))?;
                self.name = Some((*token).to_string());
            }
            "direction" => {
                let [x, y, z] = parse_floats(values, "direction", line_number)?;
                self.direction = DVec3::new(x, y, z);
            }
            "length" => {
                let [length] = parse_floats(values, "length", line_number)?;
                self.length = length;
            }
            "axis" => {
                if values.len() < 4 {
                    return Err(missing("axis", 4, values.len(), line_number).into());
                }
                let [x, y, z] = parse_floats(&values[..3], "axis", line_number)?;
                let order = values[3]
                    .parse::<AxisOrder>()
                    .map_err(|kind| ParseError::new(line_number, kind))?;
                self.axis = Some(BoneAxis {
                    angles: DVec3::new(x, y, z),
                    order,
                });
            }
            "dof" => {
                self.dof = values.iter().map(|token| (*token).to_string()).collect();
            }
            "limits" => {
                self.limits.extend(scan_limits(line, line_number)?);
            }
            other => trace!("line {line_number}: ignoring bone field '{other}'"),
        }
        Ok(())
    }
}

/// Collect every `(min max)` pair on a line
///
/// A logical limits block may span several physical lines; each line is
/// scanned on its own and its pairs appended in order.
fn scan_limits(line: &str, line_number: usize) -> std::result::Result<Vec<Limit>, ParseError> {
    let mut limits = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('(') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(')') else {
            return Err(ParseError::new(
                line_number,
                ParseErrorKind::InvalidLimits(rest[open..].to_string()),
            ));
        };

        let inner = &after_open[..close];
        let tokens: Vec<&str> = inner.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(ParseError::new(
                line_number,
                ParseErrorKind::InvalidLimits(format!("({inner})")),
            ));
        }
        limits.push(Limit {
            min: parse_limit(tokens[0], line_number)?,
            max: parse_limit(tokens[1], line_number)?,
        });

        rest = &after_open[close + 1..];
    }

    Ok(limits)
}

fn missing(field: &str, expected: usize, found: usize, line: usize) -> ParseError {
    ParseError::new(
        line,
        ParseErrorKind::MissingValues {
            field: field.to_string(),
            expected,
            found,
        },
    )
}

fn unmatched_begin(section: Section, line: usize) -> ParseError {
    ParseError::new(
        line,
        ParseErrorKind::UnmatchedBegin {
            section: section.label().to_string(),
        },
    )
}

fn unmatched_end(section: Section, line: usize) -> ParseError {
    ParseError::new(
        line,
        ParseErrorKind::UnmatchedEnd {
            section: section.label().to_string(),
        },
    )
}

#[derive(Debug, Default)]
struct SkeletonParser {
    skeleton: Skeleton,
    section: Section,
    documentation: Vec<String>,
    /// Record between `begin` and `end` in `:bonedata`
    open_bone: Option<BoneRecord>,
    /// Line of an unclosed `begin` in `:hierarchy`
    hierarchy_begin: Option<usize>,
}

impl SkeletonParser {
    fn feed(&mut self, line_number: usize, line: &str) -> Result<()> {
        if let Some(header) = line.strip_prefix(':') {
            let header = header.trim_start();
            let (name, inline) = header
                .split_once(char::is_whitespace)
                .map_or((header, ""), |(name, rest)| (name, rest.trim()));

            self.close_section()?;
            self.section = Section::from_name(name);
            trace!("line {line_number}: entering section :{name}");

            if self.section == Section::Unknown {
                debug!("line {line_number}: ignoring unrecognized section :{name}");
            }
            if !inline.is_empty() {
                self.body_line(line_number, inline)?;
            }
            return Ok(());
        }

        self.body_line(line_number, line)
    }

    fn body_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        match self.section {
            Section::Preamble | Section::Unknown => {}
            Section::Version => self.skeleton.version = line.to_string(),
            Section::Name => self.skeleton.name = line.to_string(),
            Section::Units => {
                let mut tokens = line.split_whitespace();
                if let (Some(key), Some(value)) = (tokens.next(), tokens.next()) {
                    self.skeleton
                        .units
                        .insert(key.to_string(), value.to_string());
                }
            }
            Section::Documentation => self.documentation.push(line.to_string()),
            Section::Root => self.root_line(line_number, line)?,
            Section::BoneData => self.bonedata_line(line_number, line)?,
            Section::Hierarchy => self.hierarchy_line(line_number, line)?,
        }
        Ok(())
    }

    fn root_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&key, values)) = tokens.split_first() else {
            return Ok(());
        };
        if values.is_empty() {
            return Ok(());
        }

        if matches!(key.to_ascii_lowercase().as_str(), "position" | "orientation") {
            for token in values {
                parse_float(token, key, line_number)?;
            }
        }

        self.skeleton.root.insert(
            key.to_string(),
            values.iter().map(|token| (*token).to_string()).collect(),
        );
        Ok(())
    }

    fn bonedata_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        match line.to_ascii_lowercase().as_str() {
            "begin" => {
                if let Some(record) = &self.open_bone {
                    return Err(unmatched_begin(Section::BoneData, record.begin_line).into());
                }
                self.open_bone = Some(BoneRecord::opened_at(line_number));
            }
            "end" => {
                let record = self
                    .open_bone
                    .take()
                    .ok_or_else(|| unmatched_end(Section::BoneData, line_number))?;
                let begin_line = record.begin_line;
                match record.into_definition() {
                    Some(bone) => {
                        if self.skeleton.bones.contains_key(&bone.name) {
                            debug!(
                                "line {line_number}: bone '{}' redefined, keeping the later record",
                                bone.name
                            );
                        }
                        self.skeleton.bones.insert(bone.name.clone(), bone);
                    }
                    None => debug!(
                        "line {line_number}: dropping unnamed bone record opened at line {begin_line}"
                    ),
                }
            }
            _ => match self.open_bone.as_mut() {
                Some(record) => record.apply_field(line_number, line)?,
                None => warn!("line {line_number}: bone field outside begin/end ignored"),
            },
        }
        Ok(())
    }

    fn hierarchy_line(&mut self, line_number: usize, line: &str) -> Result<()> {
        match line.to_ascii_lowercase().as_str() {
            "begin" => {
                if let Some(begin_line) = self.hierarchy_begin {
                    return Err(unmatched_begin(Section::Hierarchy, begin_line).into());
                }
                self.hierarchy_begin = Some(line_number);
            }
            "end" => {
                if self.hierarchy_begin.take().is_none() {
                    return Err(unmatched_end(Section::Hierarchy, line_number).into());
                }
            }
            _ => {
                let mut tokens = line.split_whitespace();
                if let Some(parent) = tokens.next() {
                    let children = tokens.map(str::to_string).collect();
                    self.skeleton.hierarchy.insert(parent.to_string(), children);
                }
            }
        }
        Ok(())
    }

    /// Fail if the section being left still has an open `begin`
    fn close_section(&mut self) -> Result<()> {
        if let Some(record) = &self.open_bone {
            return Err(unmatched_begin(Section::BoneData, record.begin_line).into());
        }
        if let Some(begin_line) = self.hierarchy_begin {
            return Err(unmatched_begin(Section::Hierarchy, begin_line).into());
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Skeleton> {
        self.close_section()?;
        self.skeleton.documentation = self.documentation.join("\n");
        debug!(
            "parsed skeleton '{}': {} bones, {} hierarchy entries",
            self.skeleton.name,
            self.skeleton.bones.len(),
            self.skeleton.hierarchy.len()
        );
        Ok(self.skeleton)
    }
}
