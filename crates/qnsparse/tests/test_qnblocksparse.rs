//! Tests for flux-conserving block-sparse storage.
//!
//! Covers:
//! - The two-axis worked example (block selection, offsets, buffer length)
//! - Block and element addressing against hand-computed positions
//! - Multi-sector and Z_n quantum numbers
//! - Scalar (rank-0) storage

use qnsparse::storage::blocksparse::{BlockOffset, QnBlockSparse};
use qnsparse::{Arrow, Block, QN, QnIndex, QnIndexSet, QnTensor, TensorError};

fn example_indices() -> QnIndexSet<i32> {
    QnIndexSet::new(vec![
        QnIndex::new([(0, 2), (1, 3)], Arrow::Out),
        QnIndex::new([(0, 2), (-1, 2)], Arrow::Out),
    ])
}

/// Two axes, target charge 0: (A0,B0) and (A1,B1) survive.
#[test]
fn test_example_layout() {
    let is = example_indices();
    let storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);

    assert_eq!(
        storage.blockoffsets().entries(),
        &[BlockOffset::new(0, 0), BlockOffset::new(3, 4)]
    );
    assert_eq!(storage.nnz(), 10);
    assert_eq!(storage.block_offset(&is, &[0, 0]), Ok(Some(0)));
    assert_eq!(storage.block_offset(&is, &[1, 1]), Ok(Some(4)));
    assert_eq!(storage.block_offset(&is, &[0, 1]), Ok(None));
    assert_eq!(storage.block_offset(&is, &[1, 0]), Ok(None));
}

/// Every dense coordinate either hits its block at the column-major local
/// offset or reports a structural zero.
#[test]
fn test_example_element_addressing() {
    let is = example_indices();
    let mut storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);
    for (k, x) in storage.as_mut_slice().iter_mut().enumerate() {
        *x = k as f64;
    }

    for i in 0..5 {
        for j in 0..4 {
            let value = storage.element(&is, &[i, j]).unwrap().copied();
            let expected = match (i < 2, j < 2) {
                (true, true) => Some((i + 2 * j) as f64),
                (false, false) => Some((4 + (i - 2) + 3 * (j - 2)) as f64),
                _ => None,
            };
            assert_eq!(value, expected, "element ({i}, {j})");
        }
    }
}

#[test]
fn test_write_then_read_through_blocks() {
    let is = example_indices();
    let mut storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);

    storage
        .block_mut(&is, &[1, 1])
        .unwrap()
        .unwrap()
        .copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    assert_eq!(storage.element(&is, &[2, 2]), Ok(Some(&1.0)));
    assert_eq!(storage.element(&is, &[4, 2]), Ok(Some(&3.0)));
    assert_eq!(storage.element(&is, &[2, 3]), Ok(Some(&4.0)));
    assert_eq!(storage.element(&is, &[4, 3]), Ok(Some(&6.0)));
    assert_eq!(&storage.as_slice()[..4], &[0.0; 4]);
}

#[test]
fn test_contract_violations_are_errors() {
    let is = example_indices();
    let mut storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);

    assert!(matches!(
        storage.block(&is, &[0, 0, 0]),
        Err(TensorError::WrongNumberOfIndices { expected: 2, actual: 3 })
    ));
    assert!(matches!(
        storage.element_mut(&is, &[]),
        Err(TensorError::WrongNumberOfIndices { expected: 2, actual: 0 })
    ));
    assert!(matches!(
        storage.block_mut(&is, &[2, 0]),
        Err(TensorError::BlockIndexOutOfBounds { axis: 0, .. })
    ));
    assert!(matches!(
        storage.element(&is, &[0, 4]),
        Err(TensorError::IndexOutOfBounds { axis: 1, index: 4, dim_size: 4 })
    ));
}

/// A three-site spin chain with particle number and Sz sectors.
#[test]
fn test_multi_sector_qn() {
    // empty, up, down, doubly occupied
    let site = QnIndex::new(
        [
            (QN::new(&[0, 0]), 1),
            (QN::new(&[1, 1]), 1),
            (QN::new(&[1, -1]), 1),
            (QN::new(&[2, 0]), 1),
        ],
        Arrow::Out,
    );
    let is = QnIndexSet::new(vec![site.clone(), site.clone(), site]);
    let flux = QN::new(&[3, 1]);
    let t: QnTensor<QN, f64> = QnTensor::zeros(is, flux);

    let blocks: Vec<Block> = t.iter_blocks().map(|(b, _)| b).collect();
    for block in &blocks {
        assert_eq!(t.inds().block_charge(block.coords()), flux);
    }
    // N=3, Sz=+1: (up, double, empty) in any order gives 6, (up, up, down) gives 3
    assert_eq!(blocks.len(), 9);
    assert_eq!(t.nnz(), 9);
}

#[test]
fn test_parity_qn() {
    let odd = QN::with_moduli(&[(1, 2)]);
    let even = QN::with_moduli(&[(0, 2)]);
    let mode = QnIndex::new([(even, 1), (odd, 1)], Arrow::Out);
    let is = QnIndexSet::new(vec![mode.clone(), mode.clone(), mode.dag()]);

    let t: QnTensor<QN, f64> = QnTensor::zeros(is, even);
    // even number of odd choices out of three axes: 1 + 3 = 4 blocks
    assert_eq!(t.nnzblocks(), 4);
    assert!(t.isblocknz(&[1, 1, 0]));
    assert!(t.isblocknz(&[1, 0, 1]));
    assert!(!t.isblocknz(&[1, 1, 1]));
}

#[test]
fn test_scalar_storage_any_flux() {
    for flux in [0, 1, -7] {
        let is: QnIndexSet<i32> = QnIndexSet::scalar();
        let mut storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &flux);
        assert_eq!(storage.blockoffsets().entries(), &[BlockOffset::new(0, 0)]);
        assert_eq!(storage.nnz(), 1);
        *storage.block_mut(&is, &[]).unwrap().unwrap().first_mut().unwrap() = 9.0;
        assert_eq!(storage.element(&is, &[]), Ok(Some(&9.0)));
    }
}

#[test]
fn test_no_allowed_blocks() {
    let is = example_indices();
    let storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &3);
    assert_eq!(storage.nnz(), 0);
    assert_eq!(storage.nnzblocks(), 0);
    assert_eq!(storage.element(&is, &[0, 0]), Ok(None));
    assert_eq!(storage.block(&is, &[1, 1]), Ok(None));
}

#[test]
fn test_zero_size_sub_block() {
    let is = QnIndexSet::new(vec![
        QnIndex::new([(0i32, 2), (1, 0)], Arrow::Out),
        QnIndex::new([(0i32, 1), (-1, 3)], Arrow::Out),
    ]);
    let storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);

    // (0,0) volume 2 and (1,1) volume 0
    assert_eq!(storage.nnzblocks(), 2);
    assert_eq!(storage.nnz(), 2);
    assert_eq!(storage.block(&is, &[1, 1]), Ok(Some(&[][..])));
    // axis 0 has dimension 2, so coordinate 1 stays in sub-block 0
    assert_eq!(storage.element(&is, &[1, 0]), Ok(Some(&0.0)));
    assert_eq!(storage.element(&is, &[1, 1]), Ok(None));
}

/// One axis without sub-blocks empties the tensor, however many other
/// combinations there are.
#[test]
fn test_empty_axis_among_wide_axes() {
    let wide = QnIndex::new((0..10).map(|q| (q, 1usize)), Arrow::Out);
    let mut indices = vec![wide; 20];
    indices.push(QnIndex::new(Vec::<(i32, usize)>::new(), Arrow::In));
    let is = QnIndexSet::new(indices);

    let storage: QnBlockSparse<f64> = QnBlockSparse::zeros(&is, &0);
    assert_eq!(storage.nnz(), 0);
    assert_eq!(storage.nnzblocks(), 0);
    assert_eq!(storage.iter_blocks(&is).unwrap().count(), 0);
}
