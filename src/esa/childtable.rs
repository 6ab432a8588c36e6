use super::UNDEF;

/// Builds `Up`, `Down` and `Next` from the LCP array in two linear passes
/// over a monotonic stack of LCP indices.
pub(super) fn build(lcp: &[i32]) -> (Vec<i32>, Vec<i32>, Vec<i32>) {
    let n1 = lcp.len();
    let mut up = vec![UNDEF; n1];
    let mut down = vec![UNDEF; n1];
    let mut next = vec![UNDEF; n1];

    // Pass 1: Up / Down.
    let mut stack: Vec<i32> = vec![0];
    for i in 1..n1 as i32 {
        let mut last = UNDEF;
        while lcp[i as usize] < lcp[*stack.last().unwrap() as usize] {
            last = stack.pop().unwrap();
            let top = *stack.last().unwrap();
            if lcp[i as usize] <= lcp[top as usize] && lcp[top as usize] != lcp[last as usize] {
                down[top as usize] = last;
            }
        }
        if last != UNDEF {
            up[i as usize] = last;
        }
        stack.push(i);
    }

    // Pass 2: Next.
    stack = vec![0];
    for i in 0..n1 as i32 {
        while lcp[i as usize] < lcp[*stack.last().unwrap() as usize] {
            stack.pop();
        }
        if lcp[i as usize] == lcp[*stack.last().unwrap() as usize] {
            let last = stack.pop().unwrap();
            next[last as usize] = i;
        }
        stack.push(i);
    }

    (up, down, next)
}
