//! Activation records.
//!
//! An activation is shared by the frame running in it, the frames it
//! called (through `parent`) and every closure created while it was
//! current. It is freed once none of those remain, so a returned frame that
//! no closure captured goes away at its `RET`.

use std::cell::{Cell, RefCell};
use std::fmt::Write;
use std::rc::Rc;

use crate::{Closure, Value};

/// Shared handle to an activation.
pub(crate) type ActivationRef = Rc<RefCell<Activation>>;

/// One call frame.
///
/// `slots` stays `None` until the callee executes `ENTER`.
#[derive(Debug)]
pub(crate) struct Activation {
    pub(crate) parent: Option<ActivationRef>,
    pub(crate) closure: Option<Closure>,
    pub(crate) return_ip: Option<usize>,
    pub(crate) slots: Option<Vec<Option<Value>>>,
    _live: LiveToken,
}

impl Activation {
    /// The top-level activation every run starts in.
    pub(crate) fn root(live: &LiveCount) -> ActivationRef {
        Activation::call(live, None, None, None)
    }

    pub(crate) fn call(
        live: &LiveCount,
        parent: Option<ActivationRef>,
        closure: Option<Closure>,
        return_ip: Option<usize>,
    ) -> ActivationRef {
        Rc::new(RefCell::new(Activation {
            parent,
            closure,
            return_ip,
            slots: None,
            _live: live.token(),
        }))
    }
}

// Unlinks the parent chain iteratively; a run that fails deep in a
// recursion would otherwise drop one nested frame per native stack frame.
impl Drop for Activation {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(parent) = next {
            next = match Rc::try_unwrap(parent) {
                Ok(cell) => {
                    let mut activation = cell.into_inner();
                    activation.parent.take()
                }
                Err(_) => None,
            };
        }
    }
}

/// Number of activations currently alive in one run.
#[derive(Clone, Debug, Default)]
pub(crate) struct LiveCount(Rc<Cell<usize>>);

impl LiveCount {
    pub(crate) fn get(&self) -> usize {
        self.0.get()
    }

    fn token(&self) -> LiveToken {
        self.0.set(self.0.get() + 1);
        LiveToken(Rc::clone(&self.0))
    }
}

/// Held by each activation; releases its count on drop.
#[derive(Debug)]
struct LiveToken(Rc<Cell<usize>>);

impl Drop for LiveToken {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// `<parent, closure, return ip, [slots]>`, nested along the dynamic
/// chain, with `-` for anything absent.
pub(crate) fn render(activation: &ActivationRef) -> String {
    let mut chain = vec![Rc::clone(activation)];
    loop {
        let parent = chain[chain.len() - 1].borrow().parent.clone();
        match parent {
            Some(parent) => chain.push(parent),
            None => break,
        }
    }

    let mut text = String::from("-");
    for activation in chain.iter().rev() {
        let activation = activation.borrow();
        let mut rendered = format!("<{text}, ");
        match &activation.closure {
            Some(closure) => {
                let _ = write!(rendered, "{closure}");
            }
            None => rendered.push('-'),
        }
        match activation.return_ip {
            Some(ip) => {
                let _ = write!(rendered, ", {ip}, ");
            }
            None => rendered.push_str(", -, "),
        }
        match &activation.slots {
            Some(slots) => {
                rendered.push('[');
                for (i, slot) in slots.iter().enumerate() {
                    if i > 0 {
                        rendered.push_str(", ");
                    }
                    match slot {
                        Some(value) => {
                            let _ = write!(rendered, "{value}");
                        }
                        None => rendered.push('-'),
                    }
                }
                rendered.push(']');
            }
            None => rendered.push('-'),
        }
        rendered.push('>');
        text = rendered;
    }
    text
}
