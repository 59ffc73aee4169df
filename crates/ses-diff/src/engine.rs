//! Shortest edit script engine.
//!
//! This is Myers' O(ND) difference algorithm with the Hirschberg
//! linear-space refinement:
//!
//!   E. Myers, "An O(ND) Difference Algorithm and Its Variations",
//!   Algorithmica 1, 2 (1986), 251-266.
//!
//! Each sub-problem is split around its middle snake, found by running the
//! greedy furthest-reaching search forward from the top-left corner and
//! backward from the bottom-right corner until the two frontiers overlap.
//! Sub-problems are kept on an explicit work stack instead of the call
//! stack, processed left part, snake, right part, so edits are appended in
//! order.
//!
//! The engine only needs `T: Eq`. Adapters in [`crate::bytes`] and
//! [`crate::lines`] turn their inputs into token slices and attach payloads
//! to the result.

use std::ops::{Index, IndexMut};

use tracing::{debug, trace, warn};

use crate::edit::{MiddleSnake, Op};
use crate::script::EditScript;

/// The budget used when the caller does not supply one: larger than any
/// possible edit distance between sequences of these lengths.
pub const fn default_budget(old_len: usize, new_len: usize) -> usize {
    old_len + new_len + 2
}

/// Compute the edit script turning `old` into `new` with no distance limit.
pub fn diff<T: Eq>(old: &[T], new: &[T]) -> EditScript {
    diff_with_budget(old, new, None)
}

/// Compute the edit script turning `old` into `new`, giving up once the edit
/// distance reaches `budget`.
///
/// `None` means [`default_budget`]. When the budget is reached the returned
/// script is flagged with [`EditScript::is_truncated`] and its edits are
/// incomplete.
pub fn diff_with_budget<T: Eq>(old: &[T], new: &[T], budget: Option<usize>) -> EditScript {
    let budget = budget.unwrap_or_else(|| default_budget(old.len(), new.len()));
    let script = Engine::new(old, new, budget).run();
    if script.is_truncated() {
        warn!(
            old_len = old.len(),
            new_len = new.len(),
            budget,
            "edit distance reached budget, script truncated"
        );
    } else {
        debug!(
            old_len = old.len(),
            new_len = new.len(),
            budget,
            distance = script.distance(),
            edits = script.len(),
            "diff computed"
        );
    }
    script
}

/// Furthest-reaching `x` per diagonal, indexed by signed diagonal number.
///
/// Coordinates are signed because paths at the edge of the search may step
/// outside the edit graph before they are discarded.
struct Diagonals {
    offset: isize,
    v: Vec<isize>,
}

impl Diagonals {
    /// A buffer addressable for diagonals in `-reach..=reach`.
    fn new(reach: usize) -> Self {
        Self {
            offset: reach as isize,
            v: vec![0; 2 * reach + 1],
        }
    }
}

impl Index<isize> for Diagonals {
    type Output = isize;

    fn index(&self, k: isize) -> &isize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Diagonals {
    fn index_mut(&mut self, k: isize) -> &mut isize {
        &mut self.v[(k + self.offset) as usize]
    }
}

/// Pending work, popped last-in first-out.
enum Task {
    Solve {
        aoff: usize,
        n: usize,
        boff: usize,
        m: usize,
    },
    Snake {
        offset: usize,
        len: usize,
    },
}

/// The edit distance reached the budget.
struct Exhausted;

struct Engine<'a, T> {
    a: &'a [T],
    b: &'a [T],
    budget: usize,
    fv: Diagonals,
    rv: Diagonals,
    script: EditScript,
}

impl<'a, T: Eq> Engine<'a, T> {
    fn new(a: &'a [T], b: &'a [T], budget: usize) -> Self {
        Self {
            a,
            b,
            budget,
            fv: Diagonals::new(0),
            rv: Diagonals::new(0),
            script: EditScript::new(budget),
        }
    }

    fn run(mut self) -> EditScript {
        let (n, m) = (self.a.len(), self.b.len());

        // Eat the common prefix. This settles identical inputs without a
        // search, and the remaining script starts with an insert or delete.
        let x = self
            .a
            .iter()
            .zip(self.b)
            .take_while(|(l, r)| l == r)
            .count();
        self.script.push(Op::Match, 0, x);

        // Forward diagonals stay within the search radius; reverse diagonals
        // are shifted by the length difference of a sub-problem.
        let rest = (n - x) + (m - x);
        let reach = rest + rest / 2 + 3;
        self.fv = Diagonals::new(reach);
        self.rv = Diagonals::new(reach);

        let mut stack = vec![Task::Solve {
            aoff: x,
            n: n - x,
            boff: x,
            m: m - x,
        }];
        while let Some(task) = stack.pop() {
            match task {
                Task::Snake { offset, len } => self.script.push(Op::Match, offset, len),
                Task::Solve { aoff, n, boff, m } => {
                    if self.solve(aoff, n, boff, m, &mut stack).is_err() {
                        self.script.mark_truncated();
                        break;
                    }
                }
            }
        }
        self.script
    }

    /// Resolve one sub-problem, either directly or by splitting it around
    /// its middle snake and queueing the halves.
    fn solve(
        &mut self,
        aoff: usize,
        n: usize,
        boff: usize,
        m: usize,
        stack: &mut Vec<Task>,
    ) -> Result<(), Exhausted> {
        if n == 0 && m == 0 {
            return Ok(());
        }
        if n == 0 || m == 0 {
            if n + m >= self.budget {
                return Err(Exhausted);
            }
            if n == 0 {
                self.script.push(Op::Insert, boff, m);
            } else {
                self.script.push(Op::Delete, aoff, n);
            }
            return Ok(());
        }

        let (d, ms) = self.find_middle_snake(aoff, n, boff, m)?;
        if d >= self.budget {
            return Err(Exhausted);
        }
        trace!(aoff, n, boff, m, d, x = ms.x, y = ms.y, u = ms.u, v = ms.v, "middle snake");

        if d > 1 {
            stack.push(Task::Solve {
                aoff: aoff + ms.u,
                n: n - ms.u,
                boff: boff + ms.v,
                m: m - ms.v,
            });
            stack.push(Task::Snake {
                offset: aoff + ms.x,
                len: ms.len(),
            });
            stack.push(Task::Solve {
                aoff,
                n: ms.x,
                boff,
                m: ms.y,
            });
            return Ok(());
        }

        // One token differs. An empty snake puts the edit at the end of the
        // sub-problem, otherwise at its start.
        let at_end = ms.is_empty();
        match (d, m > n, at_end) {
            (0, _, _) => self.script.push(Op::Match, aoff, n),
            (_, true, true) => {
                self.script.push(Op::Match, aoff, n);
                self.script.push(Op::Insert, boff + m - 1, 1);
            }
            (_, true, false) => {
                self.script.push(Op::Insert, boff, 1);
                self.script.push(Op::Match, aoff, n);
            }
            (_, false, true) => {
                self.script.push(Op::Match, aoff, m);
                self.script.push(Op::Delete, aoff + n - 1, 1);
            }
            (_, false, false) => {
                self.script.push(Op::Delete, aoff, 1);
                self.script.push(Op::Match, aoff + 1, m);
            }
        }
        Ok(())
    }

    /// Find the middle snake of `a[aoff..aoff + n]` against
    /// `b[boff..boff + m]`, returning the edit distance of the sub-problem
    /// along with the snake.
    ///
    /// Forward paths extend from the neighbouring diagonal reaching further,
    /// stepping right from `k - 1` on ties; reverse paths mirror the rule.
    fn find_middle_snake(
        &mut self,
        aoff: usize,
        n: usize,
        boff: usize,
        m: usize,
    ) -> Result<(usize, MiddleSnake), Exhausted> {
        let (a, b) = (self.a, self.b);
        let (ni, mi) = (n as isize, m as isize);
        let budget = isize::try_from(self.budget).unwrap_or(isize::MAX);
        let fv = &mut self.fv;
        let rv = &mut self.rv;

        let delta = ni - mi;
        let odd = delta & 1 == 1;
        let mid = (ni + mi) / 2 + isize::from(odd);

        fv[1] = 0;
        rv[delta - 1] = ni;

        for d in 0..=mid {
            if 2 * d - 1 >= budget {
                return Err(Exhausted);
            }

            let mut k = d;
            while k >= -d {
                let mut x = if k == -d || (k != d && fv[k - 1] < fv[k + 1]) {
                    fv[k + 1]
                } else {
                    fv[k - 1] + 1
                };
                let mut y = x - k;
                let (sx, sy) = (x, y);

                while x < ni && y < mi && a[aoff + x as usize] == b[boff + y as usize] {
                    x += 1;
                    y += 1;
                }
                fv[k] = x;

                if odd && k >= delta - (d - 1) && k <= delta + (d - 1) && x >= rv[k] {
                    let ms = MiddleSnake {
                        x: sx as usize,
                        y: sy as usize,
                        u: x as usize,
                        v: y as usize,
                    };
                    return Ok(((2 * d - 1) as usize, ms));
                }
                k -= 2;
            }

            let mut k = d;
            while k >= -d {
                let kr = delta + k;
                let mut x = if k == d || (k != -d && rv[kr - 1] < rv[kr + 1]) {
                    rv[kr - 1]
                } else {
                    rv[kr + 1] - 1
                };
                let mut y = x - kr;
                let (ex, ey) = (x, y);

                while x > 0 && y > 0 && a[aoff + x as usize - 1] == b[boff + y as usize - 1] {
                    x -= 1;
                    y -= 1;
                }
                rv[kr] = x;

                if !odd && kr >= -d && kr <= d && x <= fv[kr] {
                    let ms = MiddleSnake {
                        x: x as usize,
                        y: y as usize,
                        u: ex as usize,
                        v: ey as usize,
                    };
                    return Ok(((2 * d) as usize, ms));
                }
                k -= 2;
            }
        }

        panic!("no middle snake found for a[{aoff}..+{n}] vs b[{boff}..+{m}]");
    }
}
