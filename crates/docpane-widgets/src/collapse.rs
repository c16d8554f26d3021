#![forbid(unsafe_code)]

//! Grouped collapse/expand toggles.
//!
//! Each element carrying the header attribute (`data-collapse="params-a"`)
//! names a group and receives one synthesized trigger, appended as its last
//! child. Activating the trigger flips the visibility of every element whose
//! member attribute equals the group name.
//!
//! Membership is looked up afresh on every toggle, so members added or
//! removed after setup are honored. Setup toggles each trigger once, which
//! leaves every group collapsed regardless of its initial label.
//!
//! The collapsed flag lives on the trigger and is mirrored into the state
//! attribute (`data-collapsed="true"`) so stylesheets and hosts can see it.

use docpane_dom::{CssDisplay, Document, Selector};

use crate::config::{CollapseConfig, display_value};
use crate::error::SetupError;

/// One synthesized trigger and the group it controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseTrigger<N> {
    group: String,
    header: N,
    trigger: N,
    collapsed: bool,
}

impl<N> CollapseTrigger<N> {
    /// Group identifier.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The element that declared the group.
    pub fn header(&self) -> &N {
        &self.header
    }

    /// The synthesized control.
    pub fn trigger(&self) -> &N {
        &self.trigger
    }

    /// Whether the group is currently collapsed.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }
}

/// All collapse groups on a page.
#[derive(Debug, Clone)]
pub struct CollapseController<N> {
    triggers: Vec<CollapseTrigger<N>>,
    member_attribute: String,
    state_attribute: String,
    collapse_label: String,
    expand_label: String,
    member_display: CssDisplay,
}

impl<N: Clone + PartialEq + core::fmt::Debug> CollapseController<N> {
    /// Synthesize a trigger under every group header and collapse each group.
    ///
    /// # Errors
    ///
    /// [`SetupError::ElementCreation`] if the host rejects the trigger tag.
    pub fn attach<D>(doc: &mut D, config: &CollapseConfig) -> Result<Self, SetupError>
    where
        D: Document<Node = N>,
    {
        let headers_selector = Selector::attribute_present(&config.header_attribute);

        let mut controller = Self {
            triggers: Vec::new(),
            member_attribute: config.member_attribute.clone(),
            state_attribute: config.state_attribute.clone(),
            collapse_label: config.collapse_label.clone(),
            expand_label: config.expand_label.clone(),
            member_display: display_value(&config.member_display),
        };

        for header in doc.query_selector_all(&headers_selector) {
            let group = doc
                .attribute(&header, &config.header_attribute)
                .unwrap_or_default();
            let trigger =
                doc.create_element(&config.trigger_tag)
                    .ok_or_else(|| SetupError::ElementCreation {
                        tag: config.trigger_tag.clone(),
                    })?;
            doc.set_attribute(&trigger, "class", &config.trigger_class);
            doc.set_attribute(&trigger, "href", &config.trigger_href);
            doc.set_attribute(&trigger, &config.state_attribute, "false");
            doc.set_text_content(&trigger, &config.collapse_label);
            doc.append_child(&header, &trigger);

            controller.triggers.push(CollapseTrigger {
                group,
                header,
                trigger,
                collapsed: false,
            });
            let index = controller.triggers.len() - 1;
            controller.toggle(doc, index);
        }

        tracing::debug!(groups = controller.triggers.len(), "collapse triggers attached");
        Ok(controller)
    }

    /// Flip trigger `index`. Returns the new collapsed state, or `None` if
    /// there is no such trigger.
    pub fn toggle<D>(&mut self, doc: &mut D, index: usize) -> Option<bool>
    where
        D: Document<Node = N>,
    {
        let entry = self.triggers.get_mut(index)?;
        let collapsed = !entry.collapsed;
        entry.collapsed = collapsed;

        let (label, display) = if collapsed {
            (&self.expand_label, &CssDisplay::None)
        } else {
            (&self.collapse_label, &self.member_display)
        };
        doc.set_text_content(&entry.trigger, label);
        doc.set_attribute(
            &entry.trigger,
            &self.state_attribute,
            if collapsed { "true" } else { "false" },
        );

        let members =
            doc.query_selector_all(&Selector::attribute_equals(&self.member_attribute, &entry.group));
        for member in &members {
            doc.set_display(member, display);
        }

        tracing::trace!(
            group = %entry.group,
            collapsed,
            members = members.len(),
            "collapse toggled"
        );
        Some(collapsed)
    }

    /// Toggle the group whose trigger is `node`. Returns the new collapsed
    /// state, or `None` if `node` is not a trigger.
    pub fn activate<D>(&mut self, doc: &mut D, node: &N) -> Option<bool>
    where
        D: Document<Node = N>,
    {
        let index = self.trigger_for(node)?;
        self.toggle(doc, index)
    }

    /// Index of the trigger element `node`.
    #[must_use]
    pub fn trigger_for(&self, node: &N) -> Option<usize> {
        self.triggers.iter().position(|t| &t.trigger == node)
    }

    /// Triggers in document order of their headers.
    #[must_use]
    pub fn triggers(&self) -> &[CollapseTrigger<N>] {
        &self.triggers
    }

    /// Collapsed state of the first trigger for `group`.
    #[must_use]
    pub fn is_collapsed(&self, group: &str) -> Option<bool> {
        self.triggers
            .iter()
            .find(|t| t.group == group)
            .map(CollapseTrigger::is_collapsed)
    }
}
