#![forbid(unsafe_code)]

//! Canned node chains.
//!
//! Each template is a fixed literal sequence of token kinds (custom-text
//! steps carry their own fragment). Expansion lays the nodes out left to
//! right from an anchor point and chains them in order.

use crate::geometry::Point;
use crate::graph::{Graph, GraphError, NodeId};
use crate::token::TokenKind;
use crate::token::TokenKind as K;

/// Default horizontal distance between consecutive template nodes.
pub const DEFAULT_TEMPLATE_STEP: f32 = 160.0;

/// One node of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStep {
    pub kind: TokenKind,
    /// Fragment override; only used with [`TokenKind::CustomText`].
    pub text: Option<&'static str>,
}

const fn tok(kind: TokenKind) -> TemplateStep {
    TemplateStep { kind, text: None }
}

const fn text(text: &'static str) -> TemplateStep {
    TemplateStep {
        kind: TokenKind::CustomText,
        text: Some(text),
    }
}

const EMAIL: &[TemplateStep] = &[
    tok(K::Word),
    tok(K::OneOrMore),
    tok(K::Symbol),
    tok(K::Word),
    tok(K::OneOrMore),
    text("."),
    tok(K::Word),
    tok(K::OneOrMore),
];

const ISO_DATE: &[TemplateStep] = &[
    tok(K::Digit),
    text("{4}"),
    text("-"),
    tok(K::Digit),
    text("{2}"),
    text("-"),
    tok(K::Digit),
    text("{2}"),
];

const US_PHONE: &[TemplateStep] = &[
    tok(K::GroupStart),
    tok(K::Digit),
    text("{3}"),
    tok(K::GroupEnd),
    text("-"),
    tok(K::Digit),
    text("{3}"),
    text("-"),
    tok(K::Digit),
    text("{4}"),
];

const URL: &[TemplateStep] = &[
    text("https?://"),
    tok(K::Word),
    tok(K::OneOrMore),
    text(r"\."),
    tok(K::Letters),
];

const IPV4: &[TemplateStep] = &[
    tok(K::Digit),
    text("{1,3}"),
    text(r"\."),
    tok(K::Digit),
    text("{1,3}"),
    text(r"\."),
    tok(K::Digit),
    text("{1,3}"),
    text(r"\."),
    tok(K::Digit),
    text("{1,3}"),
];

/// The shipped templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Email,
    IsoDate,
    UsPhone,
    Url,
    Ipv4,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        Self::Email,
        Self::IsoDate,
        Self::UsPhone,
        Self::Url,
        Self::Ipv4,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::IsoDate => "iso-date",
            Self::UsPhone => "us-phone",
            Self::Url => "url",
            Self::Ipv4 => "ipv4",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    #[must_use]
    pub const fn steps(self) -> &'static [TemplateStep] {
        match self {
            Self::Email => EMAIL,
            Self::IsoDate => ISO_DATE,
            Self::UsPhone => US_PHONE,
            Self::Url => URL,
            Self::Ipv4 => IPV4,
        }
    }

    /// Pattern the template produces when linearized on its own.
    #[must_use]
    pub fn pattern(self) -> String {
        self.steps()
            .iter()
            .map(|s| s.text.unwrap_or(s.kind.descriptor().fragment))
            .collect()
    }
}

/// Append the template's nodes to `graph`, chained in order, the first node
/// at `anchor` and each next one `step` units to the right.
///
/// Returns the new node ids in chain order. Fails without touching `graph`
/// when there are not enough ids left for the whole template.
pub fn expand_into(
    graph: &mut Graph,
    template: TemplateKind,
    anchor: Point,
    step: f32,
) -> Result<Vec<NodeId>, GraphError> {
    graph.ensure_room_for(template.steps().len())?;
    let mut ids = Vec::with_capacity(template.steps().len());
    for (i, s) in template.steps().iter().enumerate() {
        let position = Point::new(anchor.x + step * i as f32, anchor.y);
        let id = graph.add_node(s.kind, position)?;
        if let (Some(text), Some(node)) = (s.text, graph.node_mut(id)) {
            node.fragment = text.to_owned();
            node.label = text.to_owned();
        }
        if let Some(prev) = ids.last() {
            graph.connect(*prev, id);
        }
        ids.push(id);
    }
    Ok(ids)
}
