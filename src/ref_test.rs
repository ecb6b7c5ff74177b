// Reference index, keys are taken from 0..capacity and the payload for
// a key is always its decimal string, so that duplicate entries of the
// same key are interchangeable.
struct RefNodes {
    counts: Vec<usize>,
}

impl RefNodes {
    fn new(capacity: usize) -> RefNodes {
        RefNodes {
            counts: vec![0; capacity],
        }
    }

    fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    fn get(&self, key: i64) -> Option<String> {
        if self.counts[key as usize] == 0 {
            None
        } else {
            Some(key.to_string())
        }
    }

    fn insert(&mut self, key: i64) {
        self.counts[key as usize] += 1;
    }

    fn delete(&mut self, key: i64) -> bool {
        let count = &mut self.counts[key as usize];
        if *count == 0 {
            false
        } else {
            *count -= 1;
            true
        }
    }

    fn predecessor(&self, key: i64) -> Option<i64> {
        (0..key.max(0).min(self.counts.len() as i64))
            .rev()
            .find(|k| self.counts[*k as usize] > 0)
    }

    fn successor(&self, key: i64) -> Option<i64> {
        ((key + 1).max(0)..(self.counts.len() as i64)).find(|k| self.counts[*k as usize] > 0)
    }

    fn iter(&self) -> std::vec::IntoIter<(i64, String)> {
        self.expand(0, self.counts.len())
    }

    fn range(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, String)> {
        let (low, high) = self.to_offsets(low, high);
        self.expand(low, high)
    }

    fn reverse(&self, low: Bound<i64>, high: Bound<i64>) -> std::vec::IntoIter<(i64, String)> {
        let (low, high) = self.to_offsets(low, high);
        let mut entries: Vec<(i64, String)> = self.expand(low, high).collect();
        entries.reverse();
        entries.into_iter()
    }

    fn to_offsets(&self, low: Bound<i64>, high: Bound<i64>) -> (usize, usize) {
        let low = match low {
            Bound::Included(low) => low as usize,
            Bound::Excluded(low) => (low + 1) as usize,
            Bound::Unbounded => 0,
        };
        let high = match high {
            Bound::Included(high) => (high + 1) as usize,
            Bound::Excluded(high) => high as usize,
            Bound::Unbounded => self.counts.len(),
        };
        let high = high.min(self.counts.len());
        if low < high {
            (low, high)
        } else {
            (0, 0)
        }
    }

    fn expand(&self, low: usize, high: usize) -> std::vec::IntoIter<(i64, String)> {
        let mut entries = vec![];
        for (key, count) in self.counts[low..high].iter().enumerate() {
            let key = (low + key) as i64;
            (0..*count).for_each(|_| entries.push((key, key.to_string())));
        }
        entries.into_iter()
    }
}

fn random_low_high(size: usize) -> (Bound<i64>, Bound<i64>) {
    let size = size as u64;
    let low = (random::<u64>() % size) as i64;
    let high = (random::<u64>() % size) as i64;
    let low = match random::<u8>() % 3 {
        0 => Bound::Included(low),
        1 => Bound::Excluded(low),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    let high = match random::<u8>() % 3 {
        0 => Bound::Included(high),
        1 => Bound::Excluded(high),
        2 => Bound::Unbounded,
        _ => unreachable!(),
    };
    (low, high)
}
