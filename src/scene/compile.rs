use std::collections::BTreeMap;

use crate::animation::value::{Property, PropertyValue};
use crate::binding::layer::BindingLayer;
use crate::choreo::choreographer::Choreographer;
use crate::choreo::entry::{EntryAnimation, EntrySchedule};
use crate::foundation::core::{ElementId, Viewport};
use crate::foundation::error::{ScrollweaveError, ScrollweaveResult};
use crate::plan::builder::PlanBuilder;
use crate::plan::element::ElementAnimationPlan;
use crate::scene::model::{
    BadgeDescriptor, ChoreographyDef, EntryDef, LayoutDef, PropsDef, StepDef, TextRevealDef,
    TweenDef,
};
use crate::scene::text::{TextUnit, split_text};
use crate::timeline::phase::PhaseTimeline;

/// Validated, ready-to-mount choreography.
#[derive(Clone, Debug)]
pub struct Choreography {
    viewport: Viewport,
    plan: ElementAnimationPlan,
    entries: EntrySchedule,
    badges: Vec<BadgeDescriptor>,
    text_units: BTreeMap<ElementId, Vec<TextUnit>>,
}

impl Choreography {
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn plan(&self) -> &ElementAnimationPlan {
        &self.plan
    }

    pub fn entries(&self) -> &EntrySchedule {
        &self.entries
    }

    pub fn badges(&self) -> &[BadgeDescriptor] {
        &self.badges
    }

    /// Units of the text block `block`, in sequence order.
    pub fn text_units(&self, block: &str) -> &[TextUnit] {
        self.text_units.get(block).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_choreographer<B: BindingLayer>(self, binding: B) -> Choreographer<B> {
        Choreographer::new(self.plan, self.entries, binding)
    }
}

impl ChoreographyDef {
    /// Validate the definition and compile it into a plan and an entry schedule.
    ///
    /// Fails on the first invalid phase, value, target or step; nothing partial is returned.
    #[tracing::instrument(skip(self), fields(phases = self.phases.len(), steps = self.steps.len()))]
    pub fn build(&self) -> ScrollweaveResult<Choreography> {
        let viewport = Viewport::new(self.viewport.width, self.viewport.height)?;
        let timeline =
            PhaseTimeline::from_markers(self.phases.iter().map(|m| (m.name.clone(), m.offset)))?;

        let mut known: Vec<ElementId> = Vec::new();
        let mut builder = PlanBuilder::new(timeline);
        for el in &self.elements {
            builder = builder.element(el.id.clone(), resolve_props(&el.initial, viewport)?)?;
            known.push(el.id.clone());
        }
        for badge in &self.badges {
            builder = builder.element(
                badge.id.clone(),
                [(Property::BackgroundColor, PropertyValue::Color(badge.color))],
            )?;
            known.push(badge.id.clone());
        }

        let mut text_units = BTreeMap::new();
        for block in &self.texts {
            if text_units.contains_key(&block.id) || known.contains(&block.id) {
                return Err(ScrollweaveError::validation(format!(
                    "duplicate element '{}'",
                    block.id
                )));
            }
            let units = split_text(&block.text, block.split);
            for unit in &units {
                let id = block.id.child(unit.sequence_index);
                builder = builder.element(id.clone(), Vec::<(Property, PropertyValue)>::new())?;
                known.push(id);
            }
            text_units.insert(block.id.clone(), units);
        }

        let mut compiler = StepCompiler {
            builder,
            known: &known,
            viewport,
            text_units: &text_units,
        };
        for (i, step) in self.steps.iter().enumerate() {
            compiler.step(step).map_err(|e| match e {
                ScrollweaveError::Validation(msg) => {
                    ScrollweaveError::validation(format!("step {i}: {msg}"))
                }
                other => other,
            })?;
        }
        let plan = compiler.builder.build();

        let mut entries = Vec::new();
        for def in &self.entries {
            entries.extend(compile_entry(def, &known, &plan, viewport)?);
        }
        let entries = EntrySchedule::new(entries)?;

        tracing::debug!(
            elements = plan.elements().len(),
            entries = entries.len(),
            total_span = plan.total_span(),
            "choreography built"
        );
        Ok(Choreography {
            viewport,
            plan,
            entries,
            badges: self.badges.clone(),
            text_units,
        })
    }
}

struct StepCompiler<'a> {
    builder: PlanBuilder,
    known: &'a [ElementId],
    viewport: Viewport,
    text_units: &'a BTreeMap<ElementId, Vec<TextUnit>>,
}

impl StepCompiler<'_> {
    fn step(&mut self, step: &StepDef) -> ScrollweaveResult<()> {
        match step {
            StepDef::Tween(t) => self.tween(t),
            StepDef::Layout(l) => self.layout(l),
            StepDef::TextReveal(r) => self.text_reveal(r),
        }
    }

    // PlanBuilder is by-value; swap it out for the duration of one call
    fn with_builder(
        &mut self,
        f: impl FnOnce(PlanBuilder) -> ScrollweaveResult<PlanBuilder>,
    ) -> ScrollweaveResult<()> {
        let placeholder = PlanBuilder::new(PhaseTimeline::new());
        let builder = std::mem::replace(&mut self.builder, placeholder);
        self.builder = f(builder)?;
        Ok(())
    }

    fn tween(&mut self, t: &TweenDef) -> ScrollweaveResult<()> {
        let targets = expand_targets(&t.targets, self.known)?;
        let to = resolve_props(&t.to, self.viewport)?;
        let from: BTreeMap<Property, PropertyValue> =
            resolve_props(&t.from, self.viewport)?.into_iter().collect();
        if let Some(p) = from.keys().find(|p| !t.to.contains_key(*p)) {
            return Err(ScrollweaveError::validation(format!(
                "tween sets a start value for {p} without a target value"
            )));
        }

        for (i, target) in targets.iter().enumerate() {
            let at = t.at.clone().plus(t.stagger * i as f64);
            let target = std::slice::from_ref(target);
            for &(property, to_value) in &to {
                let start = from.get(&property).copied();
                self.with_builder(|b| match start {
                    Some(from_value) => b.from_to(
                        target,
                        at.clone(),
                        t.duration,
                        t.ease,
                        [(property, from_value, to_value)],
                    ),
                    None => b.to(target, at.clone(), t.duration, t.ease, [(property, to_value)]),
                })?;
            }
        }
        Ok(())
    }

    fn layout(&mut self, l: &LayoutDef) -> ScrollweaveResult<()> {
        for target in &l.targets {
            if !self.known.contains(&target.element) {
                return Err(unknown_element(target.element.as_str()));
            }
            let props: [(Property, PropertyValue); 3] = [
                (Property::X, target.x.resolve(Property::X, self.viewport)?),
                (Property::Y, target.y.resolve(Property::Y, self.viewport)?),
                (Property::Scale, PropertyValue::Scalar(target.scale)),
            ];
            let element = std::slice::from_ref(&target.element);
            self.with_builder(|b| b.to(element, l.at.clone(), l.duration, l.ease, props))?;
        }
        Ok(())
    }

    fn text_reveal(&mut self, r: &TextRevealDef) -> ScrollweaveResult<()> {
        let text_units = self.text_units;
        let units = text_units
            .get(&r.block)
            .ok_or_else(|| unknown_element(r.block.as_str()))?;
        if !r.distance.is_finite() {
            return Err(ScrollweaveError::validation("reveal distance must be finite"));
        }
        for unit in units {
            let id = r.block.child(unit.sequence_index);
            let start_x = unit.side_bias.sign() * r.distance;
            let at = r.at.clone().plus(r.stagger * unit.sequence_index as f64);
            let props: [(Property, PropertyValue, PropertyValue); 3] = [
                (Property::Opacity, 0.0.into(), 1.0.into()),
                (Property::X, start_x.into(), 0.0.into()),
                (Property::Color, r.from_color.into(), r.to_color.into()),
            ];
            let initial = props.map(|(p, from, _)| (p, from));
            let element = [id];
            self.with_builder(|b| {
                b.initial(element[0].as_str(), initial)?
                    .from_to(&element, at, r.duration, r.ease, props)
            })?;
        }
        Ok(())
    }
}

fn resolve_props(
    props: &PropsDef,
    viewport: Viewport,
) -> ScrollweaveResult<Vec<(Property, PropertyValue)>> {
    props
        .iter()
        .map(|(&p, v)| Ok((p, v.resolve(p, viewport)?)))
        .collect()
}

fn unknown_element(id: &str) -> ScrollweaveError {
    ScrollweaveError::validation(format!("unknown element '{id}'"))
}

/// Expand target patterns against the known element ids, keeping declaration order.
fn expand_targets(patterns: &[String], known: &[ElementId]) -> ScrollweaveResult<Vec<ElementId>> {
    let mut out = Vec::new();
    for pattern in patterns {
        if let Some(prefix) = pattern.strip_suffix('*') {
            let before = out.len();
            out.extend(
                known
                    .iter()
                    .filter(|id| prefix.ends_with('.') && id.as_str().starts_with(prefix))
                    .cloned(),
            );
            if out.len() == before {
                return Err(ScrollweaveError::validation(format!(
                    "target pattern '{pattern}' matches no element"
                )));
            }
        } else if known.iter().any(|id| id.as_str() == pattern) {
            out.push(ElementId::from(pattern.as_str()));
        } else {
            return Err(unknown_element(pattern));
        }
    }
    if out.is_empty() {
        return Err(ScrollweaveError::validation("step has no targets"));
    }
    Ok(out)
}

fn compile_entry(
    def: &EntryDef,
    known: &[ElementId],
    plan: &ElementAnimationPlan,
    viewport: Viewport,
) -> ScrollweaveResult<Vec<EntryAnimation>> {
    let targets = expand_targets(&def.targets, known)?;
    let to = resolve_props(&def.to, viewport)?;
    let from: BTreeMap<Property, PropertyValue> =
        resolve_props(&def.from, viewport)?.into_iter().collect();

    let mut out = Vec::new();
    for (i, element) in targets.into_iter().enumerate() {
        for &(property, to_value) in &to {
            let from_value = from
                .get(&property)
                .copied()
                .unwrap_or_else(|| plan.initial_value(element.as_str(), property));
            out.push(EntryAnimation {
                element: element.clone(),
                property,
                from: from_value,
                to: to_value,
                delay: def.delay + def.stagger * i as f64,
                duration: def.duration,
                ease: def.ease,
            });
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compile.rs"]
mod tests;
