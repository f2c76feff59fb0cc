use crate::wav::StereoChunk;

/// Middle value of three samples. With an odd count there is always a unique
/// middle element, so no averaging is involved.
pub fn median3(a: i16, b: i16, c: i16) -> i16 {
    let lo = a.min(b);
    let hi = a.max(b);
    lo.max(hi.min(c))
}

/// Per-channel majority vote across three aligned chunks. Votes as many
/// frames as the shortest chunk offers and appends them to `out`.
pub fn vote_chunk(a: &StereoChunk, b: &StereoChunk, c: &StereoChunk, out: &mut Vec<(i16, i16)>) {
    let frames = a.len().min(b.len()).min(c.len());
    for i in 0..frames {
        out.push((
            median3(a.left[i], b.left[i], c.left[i]),
            median3(a.right[i], b.right[i], c.right[i]),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_middle_value() {
        // one transfer holds a value, the other two agree on the real signal
        assert_eq!(median3(10, 10, 99), 10);
        assert_eq!(median3(10, 50, 10), 10);
        assert_eq!(median3(1, 1, 1), 1);
        assert_eq!(median3(-5, 3, 0), 0);
    }

    #[test]
    fn order_of_inputs_does_not_matter() {
        let vals = [-300i16, 42, 17000];
        let perms = [
            (0, 1, 2),
            (0, 2, 1),
            (1, 0, 2),
            (1, 2, 0),
            (2, 0, 1),
            (2, 1, 0),
        ];
        for (i, j, k) in perms {
            assert_eq!(median3(vals[i], vals[j], vals[k]), 42);
        }
    }

    #[test]
    fn vote_outvotes_a_single_bad_transfer() {
        let clean = StereoChunk {
            left: vec![10, 20, 30],
            right: vec![-10, -20, -30],
        };
        let damaged = StereoChunk {
            left: vec![10, 777, 777],
            right: vec![-10, -20, 777],
        };

        let mut out = Vec::new();
        vote_chunk(&clean, &damaged, &clean, &mut out);
        assert_eq!(out, vec![(10, -10), (20, -20), (30, -30)]);
    }

    #[test]
    fn vote_is_bounded_by_the_shortest_input() {
        let long = StereoChunk {
            left: vec![1, 2, 3, 4],
            right: vec![1, 2, 3, 4],
        };
        let short = StereoChunk {
            left: vec![1, 2],
            right: vec![1, 2],
        };

        let mut out = Vec::new();
        vote_chunk(&long, &short, &long, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn identical_inputs_are_a_fixed_point() {
        let chunk = StereoChunk {
            left: vec![4, 4, 9, -2],
            right: vec![7, 0, 0, 1],
        };
        let mut out = Vec::new();
        vote_chunk(&chunk, &chunk, &chunk, &mut out);
        assert_eq!(out, chunk.frames().collect::<Vec<_>>());
    }
}
