/*
 * ==========================================================================
 * LANADA - Lua-Flavored Scripting, Straight From Source
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the Lanada scripting language project.
 *
 * Lanada is dual-licensed under the terms of:
 *   - The MIT License
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

//! Reclaims frames kept alive only by their own closures.
//!
//! Declaring a function stores a closure in the current frame, and the
//! closure holds that frame: a reference cycle `Rc` alone never frees. The
//! collector walks everything reachable from the captured frames, counts
//! how many strong references each frame, table and closure receives from
//! inside that graph, and treats any surplus as a reference from outside
//! (the global frame, a running call, a value the host holds). Whatever
//! those roots cannot reach is garbage; clearing its frames and tables
//! breaks the cycles and lets `Rc` free them.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::interpreter::environment::Environment;
use crate::interpreter::Interpreter;
use crate::value::{Closure, LuaTable, Value};

/// Captured frames tracked before a collection runs mid-script.
pub(crate) const COLLECTION_THRESHOLD: usize = 1024;

enum Node {
    Frame(Rc<RefCell<Environment>>),
    Table(Rc<RefCell<LuaTable>>),
    Closure(Rc<Closure>),
}

impl Node {
    fn id(&self) -> usize {
        match self {
            Node::Frame(rc) => Rc::as_ptr(rc) as *const () as usize,
            Node::Table(rc) => Rc::as_ptr(rc) as *const () as usize,
            Node::Closure(rc) => Rc::as_ptr(rc) as *const () as usize,
        }
    }

    fn strong_count(&self) -> usize {
        match self {
            Node::Frame(rc) => Rc::strong_count(rc),
            Node::Table(rc) => Rc::strong_count(rc),
            Node::Closure(rc) => Rc::strong_count(rc),
        }
    }

    fn from_value(value: &Value) -> Option<Node> {
        match value {
            Value::Table(table) => Some(Node::Table(table.clone())),
            Value::Function(closure) => Some(Node::Closure(closure.clone())),
            _ => None,
        }
    }

    /// Outgoing strong references, or `None` when the node is borrowed and
    /// cannot be inspected.
    fn children(&self) -> Option<Vec<Node>> {
        match self {
            Node::Frame(frame) => {
                let frame = frame.try_borrow().ok()?;
                let mut out: Vec<Node> = frame.bindings().filter_map(Node::from_value).collect();
                out.extend(frame.parent().cloned().map(Node::Frame));
                Some(out)
            }
            Node::Table(table) => {
                let table = table.try_borrow().ok()?;
                Some(table.entries().filter_map(|(_, v)| Node::from_value(v)).collect())
            }
            Node::Closure(closure) => Some(vec![Node::Frame(closure.env.clone())]),
        }
    }

    fn clear(&self) {
        match self {
            Node::Frame(frame) => {
                if let Ok(mut frame) = frame.try_borrow_mut() {
                    frame.clear();
                }
            }
            Node::Table(table) => {
                if let Ok(mut table) = table.try_borrow_mut() {
                    table.clear();
                }
            }
            Node::Closure(_) => {}
        }
    }
}

struct Entry {
    node: Node,
    /// References received from other nodes in the graph.
    internal: usize,
    /// Ids of the nodes this one references; `None` if it was not inspectable.
    edges: Option<Vec<usize>>,
    live: bool,
}

impl Interpreter {
    /// Clears every captured frame (and table) that nothing outside the
    /// frame graph can reach any more, then forgets frames that were freed.
    pub(crate) fn collect_frames(&mut self) {
        let seeds = self
            .captured_frames
            .iter()
            .filter_map(|weak| weak.upgrade())
            .map(Node::Frame)
            .chain(std::iter::once(Node::Frame(self.globals.clone())));

        let mut graph: HashMap<usize, Entry> = HashMap::new();
        let mut pending: Vec<usize> = Vec::new();

        for node in seeds {
            let id = node.id();
            if !graph.contains_key(&id) {
                graph.insert(id, Entry { node, internal: 0, edges: None, live: false });
                pending.push(id);
            }
        }

        // Discover the graph and count internal references.
        while let Some(id) = pending.pop() {
            let Some(children) = graph.get(&id).and_then(|entry| entry.node.children()) else {
                continue;
            };

            let mut edges = Vec::with_capacity(children.len());
            for child in children {
                let child_id = child.id();
                let entry = graph.entry(child_id).or_insert_with(|| {
                    pending.push(child_id);
                    Entry { node: child, internal: 0, edges: None, live: false }
                });
                entry.internal += 1;
                edges.push(child_id);
            }

            if let Some(entry) = graph.get_mut(&id) {
                entry.edges = Some(edges);
            }
        }

        // The map itself holds one reference to every node.
        let mut marking: Vec<usize> = graph
            .iter()
            .filter(|(_, entry)| {
                entry.edges.is_none() || entry.node.strong_count() > entry.internal + 1
            })
            .map(|(id, _)| *id)
            .collect();

        while let Some(id) = marking.pop() {
            let Some(entry) = graph.get_mut(&id) else {
                continue;
            };
            if entry.live {
                continue;
            }
            entry.live = true;
            if let Some(edges) = &entry.edges {
                marking.extend(edges.iter().copied());
            }
        }

        let mut freed = 0;
        for entry in graph.values().filter(|entry| !entry.live) {
            if matches!(entry.node, Node::Frame(_)) {
                freed += 1;
            }
            entry.node.clear();
        }
        drop(graph);

        self.captured_frames.retain(|weak| weak.strong_count() > 0);
        self.next_collection = COLLECTION_THRESHOLD.max(self.captured_frames.len() * 2);

        if freed > 0 {
            log::debug!("released {} unreachable frame(s)", freed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::span::Span;
    use crate::value::Value;
    use crate::{execute, Interpreter};

    fn interpreter() -> (Interpreter, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let sink = lines.clone();
        let interp = Interpreter::with_output(move |line| sink.borrow_mut().push(line.to_string()));
        (interp, lines)
    }

    #[test]
    fn frames_of_finished_calls_are_released() {
        let (mut interp, _) = interpreter();
        execute("function outer() function inner() end end", &mut interp).unwrap();

        for _ in 0..50 {
            execute("outer() outer() outer()", &mut interp).unwrap();
        }
        assert!(interp.captured_frames.is_empty());
    }

    #[test]
    fn escaping_closures_keep_their_frames() {
        let (mut interp, lines) = interpreter();
        execute(
            r#"
            function counter()
              local n = 0
              function inc() n = n + 1 return n end
              return inc
            end
            c = counter()
            c()
            "#,
            &mut interp,
        )
        .unwrap();

        execute("print(c())", &mut interp).unwrap();
        assert_eq!(*lines.borrow(), vec!["2"]);
    }

    #[test]
    fn closures_held_by_the_host_survive_collection() {
        let (mut interp, _) = interpreter();
        let held = execute(
            r#"
            function counter()
              local n = 10
              function inc() n = n + 1 return n end
              return inc
            end
            return counter()
            "#,
            &mut interp,
        )
        .unwrap()
        .unwrap();

        execute("counter() counter()", &mut interp).unwrap();

        let result = interp.call_value(held, vec![], Span::default()).unwrap();
        assert_eq!(result, Value::from(11.0));
    }

    #[test]
    fn unreachable_self_referencing_tables_are_cleared() {
        let (mut interp, _) = interpreter();
        execute(
            r#"
            function make()
              local t = {}
              t.me = t
              function keep() return t end
            end
            make()
            "#,
            &mut interp,
        )
        .unwrap();
        assert!(interp.captured_frames.is_empty());
    }

    #[test]
    fn collection_during_a_run_spares_active_frames() {
        let (mut interp, lines) = interpreter();
        interp.next_collection = 2;
        execute(
            r#"
            function walk(n)
              local label = "depth " .. n
              function here() return label end
              if n > 0 then walk(n - 1) end
              return here()
            end
            print(walk(20))
            "#,
            &mut interp,
        )
        .unwrap();
        assert_eq!(*lines.borrow(), vec!["depth 20"]);
    }
}
