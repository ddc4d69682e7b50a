//! Starter lab manual documents.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

const BASIC: &str = r"# Lab Title

## Objectives

- Objective 1
- Objective 2

## Materials

- Material 1
- Material 2

## Procedure

1. Step 1
2. Step 2

## Data Collection

<!-- lab:data-table rows=5 -->
| Observation | Value | Notes |
|-------------|-------|-------|
<!-- /lab:data-table -->

## Analysis

<!-- lab:reflection -->
Analyze your results here.
{fill:textarea rows=5}
<!-- /lab:reflection -->

## Conclusions

{fill:textarea rows=5}
";

const MEASUREMENT: &str = r#"# Measurement Lab

## Objective

Explore different ways to measure physical properties of objects.

## Part 1: Object Selection

<!-- lab:object-selection -->
<!-- /lab:object-selection -->

## Part 2: Physical Aspects

Think of 5 different physical aspects you could measure for each object.

<!-- lab:data-table rows=5 title="Physical Aspects Table" -->
| Physical Aspect | Measurement Device | Measurement Unit |
|-----------------|--------------------|------------------|
<!-- /lab:data-table -->

## Part 3: Feasibility Analysis

<!-- lab:measurement-feasibility -->
Which physical aspects COULD we measure tonight for the object in the room?
{fill:textarea rows=3}

How might we get those other measurements?

- [ ] Internet access
- [ ] Money/funding
- [ ] Institutional review
- [ ] Moving equipment
- [ ] Other: {fill:text}
<!-- /lab:measurement-feasibility -->

## Part 4: Reflection

<!-- lab:reflection -->
Compare the measurement approaches for both objects.
{fill:textarea rows=5}
<!-- /lab:reflection -->

## Part 5: Unit Conversion

<!-- lab:calculation -->
Convert one of your measurements to a different unit. Show your work.

Original value: {fill:number}

Converted value: {fill:number}
<!-- /lab:calculation -->
"#;

const OBSERVATION: &str = r#"# Observation Lab

## Objective

Practice systematic observation and recording.

## Observations

<!-- lab:data-table rows=10 title="Observation Log" -->
| Time | Observation | Notes |
|------|-------------|-------|
<!-- /lab:data-table -->

## Summary

<!-- lab:reflection -->
Summarize your key observations.
{fill:textarea}
<!-- /lab:reflection -->
"#;

/// Built-in starter documents for new lab manuals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabTemplate {
    /// Objectives, materials, procedure, a data table and a reflection.
    Basic,
    /// The physical measurement lab.
    Measurement,
    /// A timed observation log.
    Observation,
}

impl LabTemplate {
    pub const ALL: [Self; 3] = [Self::Basic, Self::Measurement, Self::Observation];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Measurement => "measurement",
            Self::Observation => "observation",
        }
    }

    /// Markdown source of the starter document.
    #[must_use]
    pub fn markdown(self) -> &'static str {
        match self {
            Self::Basic => BASIC,
            Self::Measurement => MEASUREMENT,
            Self::Observation => OBSERVATION,
        }
    }
}

impl fmt::Display for LabTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LabTemplate {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RenderError::UnknownTemplate {
                name: s.to_owned(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}
